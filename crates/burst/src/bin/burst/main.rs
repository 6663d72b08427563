use burst::{Args, Config, Report};

fn init_logger() -> anyhow::Result<()> {
    alto_logger::init_alt_term_logger()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    simple_env_load::load_env_from(&[".env", ".env.dev"]);

    init_logger()?;

    let argv = std::env::args().skip(1).collect::<Vec<_>>();
    let argv = argv.iter().map(String::as_str).collect::<Vec<_>>();
    let args = Args::parse(&argv)?;

    if args.help {
        print!("{}", Args::usage()?);
        return Ok(());
    }

    let path = args.config_path();
    if args.init {
        Config::write_default(&path)?;
        log::info!("wrote an example config to '{}'", path.display());
        return Ok(());
    }

    let config = Config::load(&path)?;
    let registry = config.registry()?;
    let parser = config.parser(args.stop_at_non_option);

    let rest = args.rest.iter().map(String::as_str).collect::<Vec<_>>();

    if args.tokens {
        let tokens = parser.flatten(&registry, &rest);
        if args.json {
            println!("{}", serde_json::to_string_pretty(&tokens)?);
        } else {
            tokens.iter().for_each(|token| println!("{}", token));
        }
        return Ok(());
    }

    let matches = parser.parse(&registry, &rest)?;
    let report = Report::new(&matches);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report);
    }
    Ok(())
}
