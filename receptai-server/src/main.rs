#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use clap::{parser::ValueSource, ArgMatches, CommandFactory, FromArgMatches, Parser};
use receptai_http::serve;

#[derive(Parser)]
#[command(name = "receptai")]
struct Cli {
    /// JSON dataset file to seed the catalog from and persist to on shutdown.
    #[arg(long, env = "RECEPTAI_DATA")]
    data: Option<String>,
    #[arg(long, env = "RECEPTAI_BIND_ADDR")]
    bind_addr: Option<String>,
    #[arg(long, env = "RECEPTAI_PORT")]
    port: Option<u16>,

    /// Local-dev instance name. Derives an isolated default port.
    #[arg(long)]
    instance: Option<String>,

    /// Bind to 127.0.0.1:0 (OS-assigned ephemeral port). Prints resolved address at startup.
    #[arg(long)]
    auto_port: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cmd = Cli::command();
    let matches = cmd.get_matches();
    let cli = Cli::from_arg_matches(&matches)?;

    let bind_addr = resolve_bind_addr(&cli, &matches)
        .map_err(|msg| std::io::Error::new(std::io::ErrorKind::InvalidInput, msg))?;
    std::env::set_var("RECEPTAI_BIND_ADDR", &bind_addr);
    if let Some(data) = &cli.data {
        std::env::set_var("RECEPTAI_DATA", data);
    }

    serve().await
}

fn resolve_bind_addr(cli: &Cli, matches: &ArgMatches) -> Result<String, String> {
    if cli.auto_port && is_set_on_command_line(matches, "bind_addr") {
        return Err("--auto-port cannot be used with --bind-addr".to_string());
    }

    if cli.auto_port && is_set_on_command_line(matches, "port") {
        return Err("--auto-port cannot be used with --port".to_string());
    }

    if is_set_on_command_line(matches, "bind_addr") {
        return Ok(cli
            .bind_addr
            .clone()
            .expect("bind_addr should be set when source is command line"));
    }

    if cli.auto_port {
        return Ok("127.0.0.1:0".to_string());
    }

    if is_set_on_command_line(matches, "port") {
        let port = cli
            .port
            .expect("port should be set when source is command line");
        return Ok(format!("127.0.0.1:{port}"));
    }

    if let Some(instance) = cli.instance.as_deref() {
        validate_instance_name(instance)?;
        return Ok(format!("127.0.0.1:{}", derive_instance_port(instance)));
    }

    if let Some(bind_addr) = &cli.bind_addr {
        return Ok(bind_addr.clone());
    }

    if let Some(port) = cli.port {
        return Ok(format!("127.0.0.1:{port}"));
    }

    Ok("127.0.0.1:7800".to_string())
}

fn is_set_on_command_line(matches: &ArgMatches, arg: &str) -> bool {
    matches.value_source(arg) == Some(ValueSource::CommandLine)
}

fn validate_instance_name(instance: &str) -> Result<(), String> {
    if instance.is_empty() {
        return Err("--instance cannot be empty".to_string());
    }

    let valid = instance
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err("--instance accepts only ASCII letters, numbers, '-' and '_'".to_string());
    }

    Ok(())
}

fn derive_instance_port(instance: &str) -> u16 {
    const BASE_PORT: u16 = 18000;
    const PORT_SPAN: u16 = 8000;
    // FNV-1a: stable across Rust versions, platforms, and compilations.
    let mut hash: u64 = 14_695_981_039_346_656_037;
    for byte in instance.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(1_099_511_628_211);
    }
    BASE_PORT + (hash as u16) % PORT_SPAN
}

#[cfg(test)]
mod tests {
    use super::*;

    static ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

    fn parse_cli(args: &[&str]) -> (Cli, ArgMatches) {
        let matches = Cli::command()
            .try_get_matches_from(args)
            .expect("args should parse");
        let cli = Cli::from_arg_matches(&matches).expect("matches should parse into Cli");
        (cli, matches)
    }

    #[test]
    fn derive_instance_port_is_deterministic_and_in_range() {
        let a = derive_instance_port("branch_a");
        let b = derive_instance_port("branch_a");
        assert_eq!(a, b, "same instance should map to same port");
        assert!(
            (18000..26000).contains(&a),
            "derived port must stay in configured range"
        );
    }

    #[test]
    fn derive_instance_port_no_common_collisions() {
        let names = [
            "branch_a",
            "branch_b",
            "main",
            "dev",
            "feature_xyz",
            "fix_bug_123",
        ];
        let ports: Vec<u16> = names.iter().map(|n| derive_instance_port(n)).collect();
        let unique: std::collections::HashSet<_> = ports.iter().copied().collect();
        assert_eq!(
            unique.len(),
            names.len(),
            "common branch names must get distinct ports: {:?}",
            ports
        );
    }

    #[test]
    fn validate_instance_name_rejects_invalid_chars() {
        assert!(validate_instance_name("valid_name-123").is_ok());
        assert!(validate_instance_name("bad/name").is_err());
        assert!(validate_instance_name("bad space").is_err());
        assert!(validate_instance_name("").is_err());
    }

    #[test]
    fn default_bind_addr() {
        // clap reads env during parsing, so clear it under the lock first
        let _guard = ENV_MUTEX.lock().expect("lock env mutex");
        std::env::remove_var("RECEPTAI_BIND_ADDR");
        std::env::remove_var("RECEPTAI_PORT");
        let (cli, matches) = parse_cli(&["receptai"]);
        assert_eq!(
            resolve_bind_addr(&cli, &matches).unwrap(),
            "127.0.0.1:7800"
        );
    }

    #[test]
    fn auto_port_overrides_env_bind_settings() {
        let _guard = ENV_MUTEX.lock().expect("lock env mutex");
        std::env::set_var("RECEPTAI_BIND_ADDR", "127.0.0.1:19001");
        std::env::set_var("RECEPTAI_PORT", "19002");

        let (cli, matches) = parse_cli(&["receptai", "--auto-port"]);
        let bind_addr = resolve_bind_addr(&cli, &matches).expect("resolve bind addr");

        std::env::remove_var("RECEPTAI_BIND_ADDR");
        std::env::remove_var("RECEPTAI_PORT");

        assert_eq!(bind_addr, "127.0.0.1:0");
    }

    #[test]
    fn auto_port_rejects_explicit_conflicting_flags() {
        let (cli_with_port, matches_with_port) =
            parse_cli(&["receptai", "--auto-port", "--port", "7801"]);
        assert_eq!(
            resolve_bind_addr(&cli_with_port, &matches_with_port).unwrap_err(),
            "--auto-port cannot be used with --port"
        );

        let (cli_with_bind, matches_with_bind) =
            parse_cli(&["receptai", "--auto-port", "--bind-addr", "127.0.0.1:7801"]);
        assert_eq!(
            resolve_bind_addr(&cli_with_bind, &matches_with_bind).unwrap_err(),
            "--auto-port cannot be used with --bind-addr"
        );
    }

    #[test]
    fn instance_derives_port() {
        let (cli, matches) = parse_cli(&["receptai", "--instance", "branch_a"]);
        let addr = resolve_bind_addr(&cli, &matches).unwrap();
        assert_eq!(
            addr,
            format!("127.0.0.1:{}", derive_instance_port("branch_a"))
        );
    }

    #[test]
    fn explicit_port_wins_over_instance() {
        let (cli, matches) =
            parse_cli(&["receptai", "--instance", "branch_a", "--port", "7900"]);
        assert_eq!(resolve_bind_addr(&cli, &matches).unwrap(), "127.0.0.1:7900");
    }
}
