use katana_var::{header, probe, Tag};

struct ProbeOptions {
    header: bool,
    bits: bool,
    from: Option<Tag>,
    to: Option<Tag>,
    literal: Option<String>,
}

fn parse() -> Result<ProbeOptions, String> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        println!("Usage: var-probe [options] <literal>");
        println!("Options:");
        println!("  -h, --help: Print this help message");
        println!("  --header: Print the C declarations of the var ABI and exit");
        println!("  --from <type>: Type to box the literal as (int8..int64, uint8..uint64, float32, float64, int, uint, float)");
        println!("  --to <type>: Type to unbox as (default: same as --from)");
        println!("  --bits: Read float literals as raw IEEE-754 bit patterns");
        std::process::exit(0);
    }

    let header = args.contains("--header");
    let bits = args.contains("--bits");
    let from = args
        .opt_value_from_str::<_, Tag>("--from")
        .map_err(|e| e.to_string())?;
    let to = args
        .opt_value_from_str::<_, Tag>("--to")
        .map_err(|e| e.to_string())?;
    let literal = args
        .opt_free_from_str::<String>()
        .map_err(|e| e.to_string())?;

    let rest = args.finish();
    if !rest.is_empty() {
        return Err(format!("unexpected arguments: {:?}", rest));
    }

    Ok(ProbeOptions {
        header,
        bits,
        from,
        to,
        literal,
    })
}

fn run(opts: ProbeOptions) -> Result<(), String> {
    if opts.header {
        print!("{}", header::render());
        return Ok(());
    }

    let from = opts.from.ok_or("missing --from <type>")?;
    let to = opts.to.unwrap_or(from);
    let literal = opts.literal.ok_or("missing literal")?;

    let var = probe::box_literal(from, &literal, opts.bits)?;
    let [payload, descriptor] = var.words();
    println!("words: {:#018x} {:#018x}", payload, descriptor);
    println!("{}: {}", to, probe::unbox_to_string(var, to)?);
    Ok(())
}

fn main() {
    env_logger::init();

    let opts = match parse() {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    };

    if let Err(err) = run(opts) {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}
