//! Unused global middleware analyzer.

mod common;

use common::Fixture;
use lantern_core::Status;

const KERNEL: &str = r#"<?php

namespace App\Http;

use Illuminate\Foundation\Http\Kernel as HttpKernel;

class Kernel extends HttpKernel
{
    protected $middleware = [
        \App\Http\Middleware\TrustProxies::class,
        \Illuminate\Http\Middleware\HandleCors::class,
        \App\Http\Middleware\PreventRequestsDuringMaintenance::class,
    ];

    protected $middlewareGroups = [];
}
"#;

const TRUST_PROXIES: &str = r#"<?php

namespace App\Http\Middleware;

use Illuminate\Http\Middleware\TrustProxies as Middleware;

class TrustProxies extends Middleware
{
    protected $proxies;
}
"#;

#[test]
fn not_applicable_without_http_kernel() {
    let fixture = Fixture::laravel();
    assert_eq!(
        fixture.run_one("unused-global-middleware").status,
        Status::NotApplicable
    );
}

#[test]
fn unconfigured_proxies_and_cors_are_flagged() {
    let fixture = Fixture::laravel();
    fixture
        .write("app/Http/Kernel.php", KERNEL)
        .write("app/Http/Middleware/TrustProxies.php", TRUST_PROXIES)
        .write("config/cors.php", "<?php return ['paths' => [], 'allowed_origins' => ['*']];");

    let run = fixture.run_one("unused-global-middleware");
    assert_eq!(run.status, Status::Failed);
    assert_eq!(run.issues.len(), 2);
    assert_eq!(
        run.issues[0].metadata["middleware"],
        "App\\Http\\Middleware\\TrustProxies"
    );
    assert_eq!(run.issues[0].line, Some(9));
    assert_eq!(
        run.issues[1].metadata["middleware"],
        "Illuminate\\Http\\Middleware\\HandleCors"
    );
}

#[test]
fn configured_middleware_passes() {
    let fixture = Fixture::laravel();
    fixture
        .write("app/Http/Kernel.php", KERNEL)
        .write(
            "app/Http/Middleware/TrustProxies.php",
            &TRUST_PROXIES.replace("protected $proxies;", "protected $proxies = '*';"),
        )
        .write("config/cors.php", "<?php return ['paths' => ['api/*']];");

    assert_eq!(
        fixture.run_one("unused-global-middleware").status,
        Status::Passed
    );
}

#[test]
fn trustedproxy_config_counts_as_configured() {
    let fixture = Fixture::laravel();
    fixture
        .write("app/Http/Kernel.php", KERNEL)
        .write("app/Http/Middleware/TrustProxies.php", TRUST_PROXIES)
        .write("config/trustedproxy.php", "<?php return ['proxies' => ['10.0.0.1']];")
        .write("config/cors.php", "<?php return ['paths' => ['api/*']];");

    assert_eq!(
        fixture.run_one("unused-global-middleware").status,
        Status::Passed
    );
}
