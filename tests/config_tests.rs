mod common;

use common::config_env::with_config_env;
use drivestream::common::config::{
    apply_overrides, load_config, ConfigOverrides, DEFAULT_BASE_URL,
};

#[test]
fn defaults_apply_with_an_empty_config() {
    with_config_env("", || {
        let config = load_config().expect("load config");

        assert_eq!(config.drive.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.drive.page_size, 100);
        assert_eq!(config.drive.timeout_secs, 30);
        assert_eq!(config.auth.access_token, None);
        assert_eq!(config.player.command, "mpv");
        assert!(config.tui.show_sizes);
    });
}

#[test]
fn config_file_overrides_defaults() {
    with_config_env(
        r#"
        [drive]
        page_size = 25

        [player]
        command = "vlc"
        args = ["--fullscreen"]
        "#,
        || {
            let config = load_config().expect("load config");
            assert_eq!(config.drive.page_size, 25);
            assert_eq!(config.player.command, "vlc");
            assert_eq!(config.player.args, vec!["--fullscreen".to_string()]);
        },
    );
}

#[test]
fn environment_overrides_the_config_file() {
    with_config_env(
        r#"
        [drive]
        page_size = 25
        "#,
        || {
            std::env::set_var("DRIVESTREAM_DRIVE_PAGE_SIZE", "50");

            let config = load_config().expect("load config");
            assert_eq!(config.drive.page_size, 50);
        },
    );
}

#[test]
fn cli_override_wins_over_environment() {
    with_config_env("", || {
        std::env::set_var("DRIVESTREAM_DRIVE_PAGE_SIZE", "50");

        let overrides = ConfigOverrides {
            page_size: Some(200),
        };

        let config = load_config().expect("load config");
        let config = apply_overrides(config, &overrides);
        assert_eq!(config.drive.page_size, 200);
    });
}

#[test]
fn access_token_reads_from_the_environment() {
    with_config_env("", || {
        std::env::set_var("DRIVESTREAM_AUTH_ACCESS_TOKEN", "ya29.test-token");

        let config = load_config().expect("load config");
        assert_eq!(config.auth.access_token.as_deref(), Some("ya29.test-token"));
    });
}

#[test]
fn zero_page_size_is_rejected() {
    with_config_env(
        r#"
        [drive]
        page_size = 0
        "#,
        || {
            let err = load_config().expect_err("page_size 0 must fail validation");
            assert!(err.to_string().contains("drive.page_size"));
        },
    );
}

#[test]
fn oversized_page_size_is_rejected() {
    with_config_env(
        r#"
        [drive]
        page_size = 5000
        "#,
        || {
            let err = load_config().expect_err("page_size above the API cap must fail");
            assert!(err.to_string().contains("drive.page_size"));
        },
    );
}

#[test]
fn empty_player_command_is_rejected() {
    with_config_env(
        r#"
        [player]
        command = ""
        "#,
        || {
            let err = load_config().expect_err("empty player command must fail");
            assert!(err.to_string().contains("player.command"));
        },
    );
}
