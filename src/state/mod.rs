mod editor;
mod persistence;
mod reducers;

pub use editor::{ColorMode, Editor, NewProjectSettings};
pub use persistence::{
    load_project_from_file, load_project_from_str, save_project, save_project_to_file,
    save_project_to_string, AutosaveManager, FileInfo, PersistenceError, PersistenceResult,
    ProjectFile, PROJECT_VERSION,
};
