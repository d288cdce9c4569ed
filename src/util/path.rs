use std::path::PathBuf;

/// Expand `~`, `$VAR` and `${VAR}`; unresolvable input is returned unchanged.
pub fn expand_path(path: &str) -> PathBuf {
    let expanded = shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string());
    PathBuf::from(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_plain_path_when_expanding_then_unchanged() {
        assert_eq!(expand_path("data/tree.toml"), PathBuf::from("data/tree.toml"));
    }

    #[test]
    fn given_env_var_when_expanding_then_substituted() {
        std::env::set_var("TREETABLE_TEST_DATA_DIR", "/srv/data");
        assert_eq!(
            expand_path("$TREETABLE_TEST_DATA_DIR/tree.toml"),
            PathBuf::from("/srv/data/tree.toml")
        );
    }
}
