use chrono::Utc;

fn main() {
    // WIFI_*, MQTT_* and STATE_ECHO may come from a .env file next to the crate
    dotenv_build::output(dotenv_build::Config::default()).unwrap();

    let version = std::env::var("BUILD_VERSION")
        .unwrap_or_else(|_| format!("dev-{}", Utc::now().format("%Y%m%d%H%M")));
    println!("cargo:rustc-env=BUILD_VERSION={version}");
    println!("cargo:rerun-if-env-changed=BUILD_VERSION");

    println!("cargo:rustc-link-arg=-Tlinkall.x");
}
