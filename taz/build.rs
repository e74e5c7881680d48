//! `TAZ_LOG_PRETTY=1` switches the CLI's stderr log output to the multi-line
//! pretty format at compile time.

fn main() {
    println!("cargo::rustc-check-cfg=cfg(tracing_pretty)");
    println!("cargo::rerun-if-env-changed=TAZ_LOG_PRETTY");
    if std::env::var("TAZ_LOG_PRETTY").is_ok_and(|value| value == "1") {
        println!("cargo::rustc-cfg=tracing_pretty");
    }
}
