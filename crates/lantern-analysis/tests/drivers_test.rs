//! Cache, session, queue and log-level analyzers.

mod common;

use common::{cache_config, config_for, Fixture};
use lantern_core::Status;

#[test]
fn null_cache_driver_fails_everywhere() {
    let fixture = Fixture::laravel();
    fixture.write("config/cache.php", &cache_config("null"));
    let run = fixture.run_one_with("cache-driver", config_for("local"));
    assert_eq!(run.status, Status::Failed);
    assert_eq!(run.issues[0].metadata["config_key"], "cache.stores.primary.driver");
}

#[test]
fn array_cache_driver_fails_outside_local() {
    let fixture = Fixture::laravel();
    fixture.write("config/cache.php", &cache_config("array"));
    assert_eq!(
        fixture.run_one_with("cache-driver", config_for("staging")).status,
        Status::Failed
    );
    assert_eq!(
        fixture.run_one_with("cache-driver", config_for("local")).status,
        Status::Passed
    );
}

#[test]
fn file_cache_driver_warns_in_production_only() {
    let fixture = Fixture::laravel();
    fixture.write("config/cache.php", &cache_config("file"));
    assert_eq!(fixture.run_one("cache-driver").status, Status::Warning);
    assert_eq!(
        fixture.run_one_with("cache-driver", config_for("staging")).status,
        Status::Passed
    );
}

#[test]
fn redis_cache_driver_passes() {
    let fixture = Fixture::laravel();
    fixture.write("config/cache.php", &cache_config("redis"));
    assert_eq!(fixture.run_one("cache-driver").status, Status::Passed);
}

#[test]
fn session_driver_rules() {
    let fixture = Fixture::laravel();
    fixture
        .env("SESSION_DRIVER=array\n")
        .write(
            "config/session.php",
            "<?php return ['driver' => env('SESSION_DRIVER', 'file'), 'lifetime' => 120];",
        );
    assert_eq!(fixture.run_one("session-driver").status, Status::Failed);
    assert_eq!(
        fixture.run_one_with("session-driver", config_for("testing")).status,
        Status::Passed
    );

    fixture.env("SESSION_DRIVER=database\n");
    assert_eq!(fixture.run_one("session-driver").status, Status::Warning);

    fixture.env("SESSION_DRIVER=redis\n");
    assert_eq!(fixture.run_one("session-driver").status, Status::Passed);
}

fn queue_config(driver: &str) -> String {
    format!(
        r#"<?php
return [
    'default' => env('QUEUE_CONNECTION', 'main'),
    'connections' => [
        'main' => ['driver' => '{driver}', 'queue' => 'default'],
    ],
];
"#
    )
}

#[test]
fn queue_driver_rules() {
    let fixture = Fixture::laravel();
    fixture.write("config/queue.php", &queue_config("sync"));
    assert_eq!(fixture.run_one("queue-driver").status, Status::Failed);
    assert_eq!(
        fixture.run_one_with("queue-driver", config_for("staging")).status,
        Status::Passed
    );
    assert_eq!(
        fixture.run_one_with("queue-driver", config_for("local")).status,
        Status::NotApplicable
    );

    fixture.write("config/queue.php", &queue_config("null"));
    assert_eq!(
        fixture.run_one_with("queue-driver", config_for("staging")).status,
        Status::Failed
    );

    fixture.write("config/queue.php", &queue_config("database"));
    assert_eq!(fixture.run_one("queue-driver").status, Status::Warning);

    fixture.write("config/queue.php", &queue_config("redis"));
    assert_eq!(fixture.run_one("queue-driver").status, Status::Passed);
}

#[test]
fn debug_logging_in_production_warns_through_stacks() {
    let fixture = Fixture::laravel();
    fixture.write(
        "config/logging.php",
        r#"<?php
return [
    'default' => env('LOG_CHANNEL', 'stack'),
    'channels' => [
        'stack' => ['driver' => 'stack', 'channels' => ['single', 'slack']],
        'single' => ['driver' => 'single', 'level' => env('LOG_LEVEL', 'debug')],
        'slack' => ['driver' => 'slack', 'level' => 'critical'],
    ],
];
"#,
    );

    let run = fixture.run_one("log-level");
    assert_eq!(run.status, Status::Warning);
    assert_eq!(run.issues.len(), 1);
    assert_eq!(run.issues[0].metadata["config_key"], "logging.channels.single.level");

    fixture.env("LOG_LEVEL=warning\n");
    assert_eq!(fixture.run_one("log-level").status, Status::Passed);
    assert_eq!(
        fixture.run_one_with("log-level", config_for("staging")).status,
        Status::NotApplicable
    );
}

#[test]
fn undefined_stack_members_are_not_reported() {
    let fixture = Fixture::laravel();
    fixture.write(
        "config/logging.php",
        r#"<?php
return [
    'default' => 'stack',
    'channels' => [
        'stack' => ['driver' => 'stack', 'channels' => ['daily', 'papertrail']],
        'daily' => ['driver' => 'daily', 'level' => 'error'],
    ],
];
"#,
    );
    assert_eq!(fixture.run_one("log-level").status, Status::Passed);
}

#[test]
fn abbreviated_environment_names_skip_production_rules() {
    let fixture = Fixture::laravel();
    fixture.write("config/cache.php", &cache_config("file"));
    assert_eq!(
        fixture.run_one_with("cache-driver", config_for("prod")).status,
        Status::Passed
    );
}
