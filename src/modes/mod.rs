pub mod flashcards;
pub mod quiz;
