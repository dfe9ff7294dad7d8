use clap::{Arg, ArgAction, Command};
use exhume_sniff::{DetectionConfig, Pipeline, Tokenizer};

fn main() {
    let matches = Command::new("exhume_sniff")
        .version("1.0")
        .author("ForensicXlab")
        .about("Signature-based file format identification for carved file bodies.")
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_parser(clap::value_parser!(String))
                .required(true)
                .help("The path to the file to identify."),
        )
        .arg(
            Arg::new("mpeg-offset-tolerance")
                .long("mpeg-offset-tolerance")
                .value_parser(clap::value_parser!(u8))
                .required(false)
                .help("Bytes of leading offset to tolerate when scanning for an MPEG audio frame sync."),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    env_logger::init();

    let file_path = matches.get_one::<String>("input").unwrap();
    let verbose = matches.get_flag("verbose");
    let mut config = DetectionConfig::default();
    if let Some(&tolerance) = matches.get_one::<u8>("mpeg-offset-tolerance") {
        config = config.with_mpeg_offset_tolerance(tolerance);
    }

    let mut tokenizer = match Tokenizer::from_path(file_path) {
        Ok(tokenizer) => tokenizer,
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    };

    if verbose {
        println!("------------------------------------------------------------");
        println!("Identifying '{}'", file_path);
        println!("------------------------------------------------------------");
    }

    let pipeline = Pipeline::new(config);
    match pipeline.detect(&mut tokenizer) {
        Ok(Some(result)) => println!("{result}"),
        Ok(None) => println!("unknown"),
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    }
}
