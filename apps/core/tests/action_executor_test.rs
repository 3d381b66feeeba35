use favdirs_core::action_executor::{open_path, LaunchError};

#[test]
fn rejects_empty_open_path() {
    assert_eq!(open_path(""), Err(LaunchError::EmptyPath));
}

#[test]
fn rejects_whitespace_open_path() {
    assert_eq!(open_path("   "), Err(LaunchError::EmptyPath));
}
