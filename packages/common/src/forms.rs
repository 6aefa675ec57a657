use serde::{Deserialize, Serialize};

/// Body of a graded submission, sent to `run/submit`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubmitForm {
    /// Problem being answered.
    pub problem_id: i64,
    /// Source code of the attempted solution.
    pub implementation: String,
}

/// Body of a custom-input run, sent to `run/custom`. Executes the
/// submission once against caller-provided input instead of the hidden
/// test set.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CustomInputForm {
    pub problem_id: i64,
    pub implementation: String,
    /// Input to feed the program in place of a stored test case.
    pub input: String,
}

/// Body of a test-generation run, sent to `run/generate-tests`. The
/// backend runs the reference solution over each input to produce
/// expected outputs.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerateTestsForm {
    /// Harness source that drives the reference solution.
    pub runner: String,
    /// Known-good solution used to produce expected outputs.
    pub reference: String,
    /// Raw inputs to turn into test cases.
    pub inputs: Vec<String>,
}
