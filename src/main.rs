use tunestats::model::TimeWindow;

#[derive(Debug, Default)]
struct CliArgs {
    api: Option<String>,
    window: Option<TimeWindow>,
}

fn main() -> anyhow::Result<()> {
    let args = parse_args(std::env::args().skip(1).collect())?;
    tunestats::app::run_with_startup(tunestats::app::AppStartupOptions {
        initial_window: args.window.unwrap_or_default(),
        api_base_url: args.api,
    })
}

fn parse_args(args: Vec<String>) -> anyhow::Result<CliArgs> {
    let mut out = CliArgs::default();
    let mut index = 0;
    while index < args.len() {
        match args[index].as_str() {
            "--api" => {
                index += 1;
                let Some(value) = args.get(index) else {
                    anyhow::bail!("--api requires a base URL");
                };
                if value.trim().is_empty() {
                    anyhow::bail!("--api cannot be empty");
                }
                out.api = Some(value.trim().to_string());
            }
            "--window" => {
                index += 1;
                let Some(value) = args.get(index) else {
                    anyhow::bail!("--window requires short, medium or long");
                };
                let Some(window) = TimeWindow::parse(value) else {
                    anyhow::bail!("unknown window {value}");
                };
                out.window = Some(window);
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            other => anyhow::bail!("unknown argument {other}"),
        }
        index += 1;
    }
    Ok(out)
}

fn print_help() {
    println!("TuneStats");
    println!("  --api url                     Backend base URL (overrides settings and env)");
    println!("  --window short|medium|long    Initial time range (default medium)");
}
