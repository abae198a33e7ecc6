//! # Info Command
//!
//! Bot status: AI backend availability, rate limits, guild count.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use serenity::builder::CreateApplicationCommand;

pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![create_info_command()]
}

fn create_info_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command.name("info").description("Show bot information");
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_info_command() {
        let commands = create_commands();
        assert_eq!(commands.len(), 1);

        let info = &commands[0];
        let name = info.0.get("name").unwrap().as_str().unwrap();
        assert_eq!(name, "info");
    }
}
