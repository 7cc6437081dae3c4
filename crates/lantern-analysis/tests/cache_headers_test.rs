//! Cache-Control probing of compiled assets against a local HTTP server.

mod common;

use common::{config_for, Fixture, StaticFetcher};
use lantern_analysis::assets::HttpAssetFetcher;
use lantern_core::{LanternConfig, Status};
use mockito::Server;

const VITE_MANIFEST: &str = r#"{
    "resources/js/app.js": {
        "file": "assets/app-4ed993c7.js",
        "src": "resources/js/app.js",
        "isEntry": true,
        "imports": ["_vendor-1a2b.js"],
        "css": ["assets/app-0a1b2c.css"]
    },
    "_vendor-1a2b.js": {"file": "assets/vendor-1a2b.js"}
}"#;

fn vite_fixture(base_url: &str) -> Fixture {
    let fixture = Fixture::laravel();
    fixture
        .env(&format!("APP_URL={base_url}\n"))
        .write("public/build/manifest.json", VITE_MANIFEST);
    fixture
}

#[test]
fn long_lived_assets_pass() {
    let mut server = Server::new();
    let mocks: Vec<_> = [
        "/build/assets/app-4ed993c7.js",
        "/build/assets/app-0a1b2c.css",
        "/build/assets/vendor-1a2b.js",
    ]
    .iter()
    .map(|path| {
        server
            .mock("HEAD", *path)
            .with_status(200)
            .with_header("cache-control", "public, max-age=31536000, immutable")
            .create()
    })
    .collect();

    let fixture = vite_fixture(&server.url());
    let mut config = LanternConfig::default();
    config.analysis.only = vec!["cache-headers".to_string()];
    let fetcher = HttpAssetFetcher::new(&config.http).unwrap();
    let report = fixture.run_with(config, Box::new(fetcher));

    for mock in mocks {
        mock.assert();
    }
    assert_eq!(report.run("cache-headers").unwrap().status, Status::Passed);
}

#[test]
fn short_lived_assets_fail_with_one_issue_each() {
    let mut server = Server::new();
    let _short = server
        .mock("HEAD", mockito::Matcher::Any)
        .with_status(200)
        .with_header("cache-control", "max-age=60")
        .create();

    let fixture = vite_fixture(&server.url());
    let mut config = LanternConfig::default();
    config.analysis.only = vec!["cache-headers".to_string()];
    let fetcher = HttpAssetFetcher::new(&config.http).unwrap();
    let report = fixture.run_with(config, Box::new(fetcher));

    let run = report.run("cache-headers").unwrap();
    assert_eq!(run.status, Status::Failed);
    assert_eq!(run.issues.len(), 3);
    assert_eq!(run.issues[0].metadata["cache_control"], "max-age=60");
}

#[test]
fn probing_stops_at_the_uncached_threshold() {
    let fixture = vite_fixture("https://shop.test");
    let fetcher = StaticFetcher::new(None);
    let requests = fetcher.requests();
    let mut config = config_for("production");
    config.analysis.only = vec!["cache-headers".to_string()];
    config.http.uncached_asset_threshold = 2;

    let report = fixture.run_with(config, Box::new(fetcher));
    let run = report.run("cache-headers").unwrap();
    assert_eq!(run.status, Status::Failed);
    assert_eq!(run.issues.len(), 2);
    assert_eq!(requests.lock().unwrap().len(), 2);
}

#[test]
fn mix_urls_use_mix_url_and_only_versioned_entries() {
    let fixture = Fixture::laravel();
    fixture
        .env("APP_URL=https://shop.test\nMIX_ASSET_URL=https://cdn.test\n")
        .write(
            "config/app.php",
            &common::APP_CONFIG.replace(
                "'asset_url' => env('ASSET_URL'),",
                "'asset_url' => env('ASSET_URL'),\n    'mix_url' => env('MIX_ASSET_URL', null),",
            ),
        )
        .write(
            "public/mix-manifest.json",
            r#"{"/js/app.js": "/js/app.js?id=9f86d0", "/css/app.css": "/css/app.css"}"#,
        );

    let fetcher = StaticFetcher::new(Some("max-age=31536000"));
    let requests = fetcher.requests();
    let mut config = config_for("production");
    config.analysis.only = vec!["cache-headers".to_string()];
    let report = fixture.run_with(config, Box::new(fetcher));

    assert_eq!(report.run("cache-headers").unwrap().status, Status::Passed);
    assert_eq!(
        *requests.lock().unwrap(),
        vec!["https://cdn.test/js/app.js?id=9f86d0".to_string()]
    );
}

#[test]
fn not_applicable_without_manifest_or_locally() {
    let fixture = Fixture::laravel();
    assert_eq!(fixture.run_one("cache-headers").status, Status::NotApplicable);

    let fixture = vite_fixture("https://shop.test");
    assert_eq!(
        fixture.run_one_with("cache-headers", config_for("local")).status,
        Status::NotApplicable
    );
}

#[test]
fn unreachable_assets_are_reported() {
    let fixture = vite_fixture("https://shop.test");
    let run = fixture.run_one("cache-headers");
    assert_eq!(run.status, Status::Failed);
    assert_eq!(run.issues.len(), 3);
    assert!(run.issues[0].message.contains("could not be fetched"));
}
