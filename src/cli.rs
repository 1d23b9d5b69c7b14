use clap::Parser;

use crate::{catalog::ItemType, Mode};

#[derive(Parser, Debug)]
#[command(name = "pharmastudy", version = env!("CARGO_PKG_VERSION"))]
pub struct PharmaStudyCli {
    #[arg(short = 'c', long = "count", value_name = "QUESTION_COUNT", help = "Number of quiz questions to ask.", long_help = COUNT_HELP)]
    pub question_count: Option<usize>,
    #[arg(long = "chapter", value_name = "CHAPTER_ID", help = "Limit the session to one chapter.", long_help = CHAPTER_HELP)]
    pub chapter: Option<String>,
    #[arg(long = "topic", value_name = "TOPIC_ID", help = "Limit the session to one topic.", long_help = TOPIC_HELP)]
    pub topic: Option<String>,
    #[arg(short = 't', long = "type", value_name = "ITEM_TYPE", help = "Limit the session to one item type.", long_help = TYPE_HELP)]
    pub item_type: Option<ItemType>,
    #[arg(short = 'm', long = "mode", default_value_t = Mode::Flash, value_name = "MODE", help = "Program mode", long_help = MODE_HELP)]
    pub mode: Mode,
    #[arg(help = "Catalog JSON file/dir paths", long_help = PATHS_HELP)]
    pub paths: Vec<String>,
}

const COUNT_HELP: &str = r#"Number of quiz questions to ask. Must be at least 1; clamped to the number of items that pass the filters. Defaults to 10. Quiz mode only."#;
const CHAPTER_HELP: &str = r#"Limit the session to items whose topic belongs to the given chapter.
Example usage: pharmastudy --chapter ch-anp ./catalogs"#;
const TOPIC_HELP: &str = r#"Limit the session to items in the given topic."#;
const TYPE_HELP: &str = r#"Limit the session to one item type. Possible values:
    molecule    - Endogenous molecules
    enzyme      - Enzymes
    medication  - Medications"#;
const MODE_HELP: &str = r#"Program mode. Possible values:
    flash   - Flashcards, front/back browsing
    quiz    - Multiple choice, four options per question"#;
const PATHS_HELP: &str = r#"Paths to load catalogs from. Can be individual files or directories."#;

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use crate::cli;

    #[test]
    fn verify_cli() {
        cli::PharmaStudyCli::command().debug_assert();
    }
}
