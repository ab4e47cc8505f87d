//! Golden file tests for model output handling.
//!
//! Each fixture in `fixtures/` holds a raw model reply and the outcome the
//! generation operation must produce when a fake client returns it.

use kitchen_core::ai::{expand_idea, generate_ideas, generate_recipe, FakeAiClient, GenerationError};
use kitchen_core::forms::{ExpandIdeaRequest, IdeasRequest, RecipeForm};
use kitchen_core::ContractError;
use serde::Deserialize;
use serde_json::json;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct TestCase {
    /// Which operation to run: "recipe", "ideas" or "full_recipe".
    contract: String,
    #[serde(default)]
    selected_equipment: Vec<String>,
    raw: String,
    /// "ok", "parse", "shape" or "invalid".
    expected: String,
}

fn load_test_cases() -> Vec<(String, TestCase)> {
    let fixtures_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");

    let mut cases = Vec::new();

    for entry in fs::read_dir(&fixtures_dir).expect("Failed to read fixtures directory") {
        let path = entry.expect("Failed to read directory entry").path();

        if path.extension().map(|e| e == "json").unwrap_or(false) {
            let name = path.file_stem().unwrap().to_string_lossy().into_owned();
            let content = fs::read_to_string(&path)
                .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
            let case: TestCase = serde_json::from_str(&content)
                .unwrap_or_else(|e| panic!("Failed to parse {}: {}", path.display(), e));
            cases.push((name, case));
        }
    }

    assert!(!cases.is_empty(), "No test fixtures found in {:?}", fixtures_dir);
    cases.sort_by(|a, b| a.0.cmp(&b.0));
    cases
}

fn outcome(result: Result<(), GenerationError>) -> String {
    match result {
        Ok(()) => "ok",
        Err(GenerationError::Contract { source, .. }) => match source {
            ContractError::Parse(_) => "parse",
            ContractError::Shape(_) => "shape",
            ContractError::Invalid(_) => "invalid",
        },
        Err(GenerationError::Ai(e)) => panic!("unexpected provider error: {}", e),
    }
    .to_string()
}

async fn run(case: &TestCase) -> String {
    let client = FakeAiClient::new().with_default_response(&case.raw);

    let result = match case.contract.as_str() {
        "recipe" => {
            let form: RecipeForm =
                serde_json::from_value(json!({ "equipment": case.selected_equipment })).unwrap();
            generate_recipe(&client, &form).await.map(|_| ())
        }
        "ideas" => {
            let request: IdeasRequest =
                serde_json::from_value(json!({ "equipment": ["kettle"] })).unwrap();
            generate_ideas(&client, &request).await.map(|_| ())
        }
        "full_recipe" => {
            let request: ExpandIdeaRequest = serde_json::from_value(json!({
                "idea": {
                    "title": "Noodle Soup",
                    "description": "Soup.",
                    "keyIngredients": ["noodles"],
                    "estimatedTime": 10,
                    "servings": 2,
                    "equipmentNeeded": ["Kettle"],
                    "dietaryTags": [],
                    "difficulty": "easy"
                },
                "sessionInputs": { "equipment": ["kettle"] }
            }))
            .unwrap();
            expand_idea(&client, &request).await.map(|_| ())
        }
        other => panic!("unknown contract {}", other),
    };

    outcome(result)
}

#[tokio::test]
async fn test_model_output_golden_files() {
    let mut failures = Vec::new();

    for (name, case) in load_test_cases() {
        let actual = run(&case).await;
        if actual != case.expected {
            failures.push(format!("{}: expected {}, got {}", name, case.expected, actual));
        }
    }

    assert!(failures.is_empty(), "Golden file mismatches:\n{}", failures.join("\n"));
}
