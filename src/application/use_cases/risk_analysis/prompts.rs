use crate::domain::parameters::ParameterSet;

pub(crate) fn build_system_prompt() -> String {
    [
        "You are a specialized Medical Data Analytics Engine mirroring an \"Orange Data Mining\" environment using the UCI Heart Disease dataset.",
        "",
        "ORANGE/UCI THRESHOLD LOGIC:",
        "- CA (Major Vessels): 0 is standard. Values >= 1 are strong \"High Risk\" indicators.",
        "- OLDPEAK (ST depression): <= 1.0 is considered low risk. > 1.0 is an \"Orange Alert\" parameter for pathology.",
        "- THAL (Thalassemia): 3 is normal. 6 (fixed) and 7 (reversible) are high-impact risk indicators.",
        "- CP (Chest Pain): 4 (Asymptomatic) often yields the highest disease probability in the dataset.",
        "- SEX: 1 (Male) statistically correlates to higher risk in this specific dataset.",
        "",
        "Your output must strictly follow the provided JSON schema. Classify the user as High, Medium, or Low risk based on these specific numerical thresholds. risk_score is a number from 0 to 100.",
    ]
    .join("\n")
}

pub(crate) fn build_user_prompt(set: &ParameterSet) -> String {
    let sex = if set.sex == 1.0 { "Male" } else { "Female" };
    let angina = if set.exang == 1.0 { "Yes" } else { "No" };

    let mut body = String::from("Perform a dataset-driven analysis for the following patient parameters:\n");
    body.push_str(&format!("Age: {}, Sex: {}, Chest Pain Type: {},\n", set.age, sex, set.cp));
    body.push_str(&format!(
        "Resting BP: {}, Cholesterol: {}, Max Heart Rate: {},\n",
        set.bp, set.chol, set.maxhr
    ));
    body.push_str(&format!(
        "Exercise Induced Angina: {}, ST Depression (Oldpeak): {},\n",
        angina, set.oldpeak
    ));
    body.push_str(&format!(
        "Number of Major Vessels (CA): {}, Thalassemia (Thal): {}\n\n",
        set.ca, set.thal
    ));
    body.push_str(
        "Explain how CA, Thal, and Oldpeak markers influence the \"Orange Database\" risk prediction.",
    );
    body
}
