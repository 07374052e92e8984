use teloxide::types::BotCommand;

/// Entries of the bot's command menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Cards,
    AddMe,
    Help,
}

impl Command {
    const ALL: [Self; 4] = [Self::Start, Self::Cards, Self::AddMe, Self::Help];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Cards => "cards",
            Self::AddMe => "addme",
            Self::Help => "help",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Start => "Начать тренировку",
            Self::Cards => "Показать карточку",
            Self::AddMe => "Запомнить меня",
            Self::Help => "Справка",
        }
    }

    #[must_use]
    pub fn bot_commands() -> Vec<BotCommand> {
        Self::ALL
            .iter()
            .map(|c| BotCommand {
                command: c.name().to_string(),
                description: c.description().to_string(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_lists_every_command() {
        let names: Vec<_> = Command::bot_commands()
            .into_iter()
            .map(|c| c.command)
            .collect();
        assert_eq!(names, vec!["start", "cards", "addme", "help"]);
    }
}
