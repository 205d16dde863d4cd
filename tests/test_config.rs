use httpwire::config::Config;

#[test]
fn test_config_load_precedence() {
    // Runs as one test so the env mutations cannot race each other

    unsafe {
        std::env::remove_var("HTTPWIRE_CONFIG");
        std::env::remove_var("LISTEN");
    }
    let cfg = Config::load().unwrap();
    assert_eq!(cfg.listen_addr, "127.0.0.1:42069");

    // YAML file takes over the default
    let path = std::env::temp_dir().join("httpwire-test-config.yaml");
    std::fs::write(&path, "listen_addr: \"0.0.0.0:8081\"\n").unwrap();
    unsafe {
        std::env::set_var("HTTPWIRE_CONFIG", &path);
    }
    let cfg = Config::load().unwrap();
    assert_eq!(cfg.listen_addr, "0.0.0.0:8081");

    // LISTEN overrides whatever the file said
    unsafe {
        std::env::set_var("LISTEN", "127.0.0.1:9000");
    }
    let cfg = Config::load().unwrap();
    assert_eq!(cfg.listen_addr, "127.0.0.1:9000");

    unsafe {
        std::env::remove_var("HTTPWIRE_CONFIG");
        std::env::remove_var("LISTEN");
    }
    std::fs::remove_file(&path).ok();
}

#[test]
fn test_config_defaults_missing_fields() {
    let cfg: Config = serde_yaml::from_str("{}").unwrap();

    assert_eq!(cfg.listen_addr, "127.0.0.1:42069");
}

#[test]
fn test_config_default_and_clone() {
    let cfg1 = Config::default();
    let cfg2 = cfg1.clone();

    assert_eq!(cfg1.listen_addr, cfg2.listen_addr);
    assert_eq!(cfg2.listen_addr, "127.0.0.1:42069");
}
