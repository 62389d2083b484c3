use clap::{arg,crate_version,Command};
use lzss_core::{encoder, Params, STD_PARAMS};

const RCH: &str = "unreachable was reached";

fn main() -> Result<(),Box<dyn std::error::Error>>
{
    env_logger::init();

    let long_help =
"Examples:
---------
Compress:      `lzss-core compress -i my_data -o my_data.lzss`
Compress with non-default parameters:
               `lzss-core compress -i my_data -o my_data.lzss --index-bits 12 --length-bits 5`";

    let mut main_cmd = Command::new("lzss-core")
        .about("Bit-packed LZSS compression for bounded-memory targets")
        .after_long_help(long_help)
        .version(crate_version!());
    main_cmd = main_cmd.subcommand(Command::new("compress")
        .arg(arg!(-i --input <PATH> "input path").required(true))
        .arg(arg!(-o --output <PATH> "output path").required(true))
        .arg(arg!(--"index-bits" <BITS> "bits used to encode a window position").default_value("10"))
        .arg(arg!(--"length-bits" <BITS> "bits used to encode an encoded match length").default_value("4"))
        .about("compress a file"));

    let matches = main_cmd.get_matches();

    if let Some(cmd) = matches.subcommand_matches("compress") {
        let path_in = cmd.get_one::<String>("input").expect(RCH);
        let path_out = cmd.get_one::<String>("output").expect(RCH);
        let index_bits: u32 = cmd.get_one::<String>("index-bits").expect(RCH).parse()?;
        let length_bits: u32 = cmd.get_one::<String>("length-bits").expect(RCH).parse()?;
        let params = if index_bits == STD_PARAMS.index_bits && length_bits == STD_PARAMS.length_bits {
            STD_PARAMS
        } else {
            Params { index_bits, length_bits }
        };

        log::debug!("compressing {path_in} -> {path_out} with {params:?}");
        let mut input = std::fs::File::open(path_in)?;
        let mut output = std::fs::File::create(path_out)?;
        encoder::compress(&mut input, &mut output, params)?;
    }

    Ok(())
}
