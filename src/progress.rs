use std::{fmt::Display, path::PathBuf};

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum ProgressError {
    NoHomeDirError(),
    ConfigIsDir(PathBuf),
    IoError(PathBuf, std::io::Error),
    SerdeError(PathBuf, serde_json::Error),
}

impl Display for ProgressError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoHomeDirError() => f.write_str("Unable to find user home directory"),
            Self::ConfigIsDir(path) => f.write_fmt(format_args!(
                "Config file is directory: {}",
                path.to_str().unwrap_or("unknown")
            )),
            Self::IoError(path, err) => f.write_fmt(format_args!(
                "IoError: {err}, path: {}",
                path.to_str().unwrap_or("unknown")
            )),
            Self::SerdeError(path, err) => f.write_fmt(format_args!(
                "SerdeError: {err}, path: {}",
                path.to_str().unwrap_or("unknown")
            )),
        }
    }
}

///Per-user study history, keyed by item id. Quiz outcomes and mastery flags
///both land here and survive between runs.
#[derive(Serialize, Deserialize)]
pub struct Progress {
    item_progress: HashMap<String, ItemProgress>,
}

const DEFAULT_HOME_PROGRESS_PATH: &str = ".config/pharmastudy/progress.json";

impl Progress {
    pub fn new() -> Self {
        Self {
            item_progress: HashMap::new(),
        }
    }

    pub fn load_from_file(path: impl Into<PathBuf>) -> Result<Self, ProgressError> {
        let path = path.into();

        if let Ok(metadata) = std::fs::metadata(&path) {
            if metadata.is_file() {
                let json = std::fs::read_to_string(&path)
                    .map_err(|err| ProgressError::IoError(path.clone(), err))?;
                let progress = serde_json::from_str(&json)
                    .map_err(|err| ProgressError::SerdeError(path, err))?;

                Ok(progress)
            } else {
                Err(ProgressError::ConfigIsDir(path))
            }
        } else {
            Ok(Self::new())
        }
    }

    pub fn load_from_user_home() -> Result<Self, ProgressError> {
        let path = get_home_path()?;
        Self::load_from_file(path)
    }

    pub fn save_to_file(&self, path: impl Into<PathBuf>) -> Result<(), ProgressError> {
        let path: PathBuf = path.into();

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|err| ProgressError::IoError(path.clone(), err))?;
            }
        }

        std::fs::write(
            &path,
            serde_json::to_string(&self)
                .map_err(|err| ProgressError::SerdeError(path.clone(), err))?,
        )
        .map_err(|err| ProgressError::IoError(path.clone(), err))?;

        Ok(())
    }

    pub fn save_to_user_home(&self) -> Result<(), ProgressError> {
        let path = get_home_path()?;
        self.save_to_file(path)
    }

    pub fn for_item(&mut self, id: &str) -> &ItemProgress {
        self.for_item_mut(id)
    }

    pub fn for_item_mut(&mut self, id: &str) -> &mut ItemProgress {
        self.item_progress.entry_ref(id).or_default()
    }

    pub fn set_mastered(&mut self, id: &str, mastered: bool) {
        self.for_item_mut(id).mastered = mastered;
    }

    ///The ids currently flagged mastered, used to seed a flashcard session.
    pub fn mastered_ids(&self) -> HashSet<String> {
        self.item_progress
            .iter()
            .filter(|(_, progress)| progress.mastered)
            .map(|(id, _)| id.clone())
            .collect()
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}

fn get_home_path() -> Result<PathBuf, ProgressError> {
    let path = dirs::home_dir();
    if let Some(mut path) = path {
        path.push(DEFAULT_HOME_PROGRESS_PATH);
        Ok(path)
    } else {
        Err(ProgressError::NoHomeDirError())
    }
}

#[derive(Serialize, Deserialize, Default)]
pub struct ItemProgress {
    pub correct: usize,
    pub incorrect: usize,
    pub mastered: bool,
}

#[cfg(test)]
mod tests {
    use super::Progress;

    const TEST_PROGRESS_FILE_PATH: &str = "./tests/progress.json";

    #[test]
    fn save_load_file() {
        let _ = std::fs::remove_file(TEST_PROGRESS_FILE_PATH);

        {
            let mut progress = Progress::default();
            let item = progress.for_item_mut("it-atropine");
            item.correct += 1;
            progress.set_mastered("it-atropine", true);
            assert!(progress.save_to_file(TEST_PROGRESS_FILE_PATH).is_ok());
        }

        {
            let mut progress = Progress::load_from_file(TEST_PROGRESS_FILE_PATH)
                .expect("Unable to load from test progress file");
            assert_eq!(progress.for_item("it-atropine").correct, 1);
            assert!(progress.mastered_ids().contains("it-atropine"));
        }
    }

    const TEST_PROGRESS_FOLDER: &str = "./tests/progress/";
    const TEST_PROGRESS_FILE_PATH_NESTED: &str = "./tests/progress/progress.json";

    #[test]
    fn save_load_file_nested() {
        let _ = std::fs::remove_dir_all(TEST_PROGRESS_FOLDER);

        {
            let mut progress = Progress::default();
            progress.for_item_mut("it-warfarin").incorrect += 2;
            assert!(progress.save_to_file(TEST_PROGRESS_FILE_PATH_NESTED).is_ok());
        }

        {
            let mut progress = Progress::load_from_file(TEST_PROGRESS_FILE_PATH_NESTED)
                .expect("Unable to load from nested test progress file");
            assert_eq!(progress.for_item("it-warfarin").incorrect, 2);
            assert!(!progress.for_item("it-warfarin").mastered);
        }
    }

    #[test]
    fn missing_file_defaults_to_empty() {
        let mut progress = Progress::load_from_file("./tests/does_not_exist.json")
            .expect("Missing progress file should load as empty");
        assert_eq!(progress.for_item("anything").correct, 0);
    }
}
