//! # AI Command
//!
//! Chat with one of the configured AI backends.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;

/// Backend choices presented to the user
const MODEL_CHOICES: &[(&str, &str)] = &[("ChatGPT", "chatgpt"), ("Gemini", "gemini")];

pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![create_ai_command()]
}

fn create_ai_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("ai")
        .description("Chat with AI (ChatGPT or Gemini)")
        .create_option(|option| {
            option
                .name("ai_model")
                .description("Which AI model answers")
                .kind(CommandOptionType::String)
                .required(true);
            for (name, value) in MODEL_CHOICES {
                option.add_string_choice(name, value);
            }
            option
        })
        .create_option(|option| {
            option
                .name("prompt")
                .description("Your message to the AI")
                .kind(CommandOptionType::String)
                .required(true)
                .min_length(1)
                .max_length(2000)
        });
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_ai_command() {
        let commands = create_commands();
        assert_eq!(commands.len(), 1);

        let ai = &commands[0];
        let name = ai.0.get("name").unwrap().as_str().unwrap();
        assert_eq!(name, "ai");
    }

    #[test]
    fn test_model_choices_match_registry_selectors() {
        let values: Vec<&str> = MODEL_CHOICES.iter().map(|(_, value)| *value).collect();
        assert_eq!(values, vec!["chatgpt", "gemini"]);
    }
}
