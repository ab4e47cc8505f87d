//! Generation operations: prompt, call the model, repair and validate.
//!
//! Each operation makes exactly one model call. Failures are returned
//! untouched; retrying is left to the caller.

use thiserror::Error;
use validator::ValidationErrors;

use crate::ai::prompts::{
    recipe_system_prompt, render_chat_system_prompt, render_expand_idea_prompt,
    render_ideas_prompt, render_recipe_user_prompt, render_update_recipe_system_prompt,
    CHAT_PROMPT_NAME, EXPAND_IDEA_PROMPT_NAME, EXPAND_IDEA_SYSTEM_PROMPT, IDEAS_PROMPT_NAME,
    IDEAS_SYSTEM_PROMPT, RECIPE_PROMPT_NAME, UPDATE_RECIPE_PROMPT_NAME,
    UPDATE_RECIPE_USER_PROMPT,
};
use crate::ai::{AiClient, AiError, ChatMessage, ChatRequest, TextStream};
use crate::contract::{parse_model_output, ContractError};
use crate::forms::{ExpandIdeaRequest, IdeasRequest, RecipeChatRequest, RecipeForm, UpdateRecipeRequest};
use crate::recipe::{FullRecipe, GeneratedRecipe, IdeaBatch, RecipeIdeaPreview};

#[derive(Error, Debug)]
pub enum GenerationError {
    /// The provider call itself failed.
    #[error(transparent)]
    Ai(#[from] AiError),

    /// The model answered, but not with what was asked for.
    #[error("{prompt_name}: {source}")]
    Contract {
        prompt_name: &'static str,
        raw: String,
        #[source]
        source: ContractError,
    },
}

async fn complete_json(
    client: &dyn AiClient,
    prompt_name: &'static str,
    system: String,
    user: String,
) -> Result<String, AiError> {
    let request = ChatRequest {
        json_response: true,
        ..ChatRequest::with_system(system, user)
    };

    let response = client.complete(prompt_name, request).await?;
    tracing::debug!(
        prompt_name,
        cached = response.cached,
        total_tokens = response.usage.total_tokens,
        "Model responded"
    );
    Ok(response.content)
}

fn parse<T>(prompt_name: &'static str, raw: String) -> Result<T, GenerationError>
where
    T: serde::de::DeserializeOwned + validator::Validate,
{
    match parse_model_output(&raw) {
        Ok(value) => Ok(value),
        Err(source) => Err(GenerationError::Contract {
            prompt_name,
            raw,
            source,
        }),
    }
}

fn check_equipment(
    prompt_name: &'static str,
    raw: String,
    recipe: GeneratedRecipe,
    selected: &[String],
) -> Result<GeneratedRecipe, GenerationError> {
    match recipe.check_equipment(selected) {
        Ok(()) => Ok(recipe),
        Err(err) => {
            let mut errors = ValidationErrors::new();
            errors.add("equipment_used", err);
            Err(GenerationError::Contract {
                prompt_name,
                raw,
                source: ContractError::Invalid(errors),
            })
        }
    }
}

/// Generate one recipe from a validated form.
pub async fn generate_recipe(
    client: &dyn AiClient,
    form: &RecipeForm,
) -> Result<GeneratedRecipe, GenerationError> {
    let raw = complete_json(
        client,
        RECIPE_PROMPT_NAME,
        recipe_system_prompt(),
        render_recipe_user_prompt(form),
    )
    .await?;

    let recipe: GeneratedRecipe = parse(RECIPE_PROMPT_NAME, raw.clone())?;
    check_equipment(RECIPE_PROMPT_NAME, raw, recipe, &form.equipment)
}

/// Generate a batch of idea previews.
pub async fn generate_ideas(
    client: &dyn AiClient,
    request: &IdeasRequest,
) -> Result<Vec<RecipeIdeaPreview>, GenerationError> {
    let raw = complete_json(
        client,
        IDEAS_PROMPT_NAME,
        IDEAS_SYSTEM_PROMPT.to_string(),
        render_ideas_prompt(request),
    )
    .await?;

    let batch: IdeaBatch = parse(IDEAS_PROMPT_NAME, raw)?;
    Ok(batch.ideas)
}

/// Expand one idea preview into a full recipe.
pub async fn expand_idea(
    client: &dyn AiClient,
    request: &ExpandIdeaRequest,
) -> Result<FullRecipe, GenerationError> {
    let raw = complete_json(
        client,
        EXPAND_IDEA_PROMPT_NAME,
        EXPAND_IDEA_SYSTEM_PROMPT.to_string(),
        render_expand_idea_prompt(&request.idea, &request.session_inputs),
    )
    .await?;

    parse(EXPAND_IDEA_PROMPT_NAME, raw)
}

/// Regenerate a recipe with the changes discussed in the chat transcript.
pub async fn update_recipe(
    client: &dyn AiClient,
    request: &UpdateRecipeRequest,
) -> Result<GeneratedRecipe, GenerationError> {
    let raw = complete_json(
        client,
        UPDATE_RECIPE_PROMPT_NAME,
        render_update_recipe_system_prompt(&request.recipe, &request.messages, &request.inputs),
        UPDATE_RECIPE_USER_PROMPT.to_string(),
    )
    .await?;

    let recipe: GeneratedRecipe = parse(UPDATE_RECIPE_PROMPT_NAME, raw.clone())?;
    check_equipment(UPDATE_RECIPE_PROMPT_NAME, raw, recipe, &request.inputs.equipment)
}

/// Stream an assistant reply to the chat transcript.
pub async fn chat_stream(
    client: &dyn AiClient,
    request: &RecipeChatRequest,
) -> Result<TextStream, AiError> {
    let messages = std::iter::once(ChatMessage::system(render_chat_system_prompt(
        &request.recipe,
    )))
    .chain(request.messages.iter().map(ChatMessage::from))
    .collect();

    let request = ChatRequest {
        messages,
        ..Default::default()
    };

    client.stream(CHAT_PROMPT_NAME, request).await
}
