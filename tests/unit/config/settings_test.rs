// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use annotrs::config::settings::Settings;

#[test]
fn test_environment_overrides_layered_settings() {
    std::env::set_var("ANNOTRS__ENGINE__CONTAINER_ID", "results");
    std::env::set_var("ANNOTRS__ENGINE__ALLOWED_PATHS", "/lettings,/commercial");
    std::env::set_var("ANNOTRS__FETCH__TIMEOUT_SECS", "20");

    let settings = Settings::new();

    std::env::remove_var("ANNOTRS__ENGINE__CONTAINER_ID");
    std::env::remove_var("ANNOTRS__ENGINE__ALLOWED_PATHS");
    std::env::remove_var("ANNOTRS__FETCH__TIMEOUT_SECS");

    let settings = settings.unwrap();
    assert_eq!(settings.engine.container_id, "results");
    assert_eq!(
        settings.engine.allowed_paths,
        vec!["/lettings".to_string(), "/commercial".to_string()]
    );
    assert_eq!(settings.fetch.timeout_secs, Some(20));
    // Keys not set anywhere fall back to the built-in defaults
    assert_eq!(settings.cache.key_prefix, "floorarea-");
}
