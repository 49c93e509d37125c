use clap::Parser;

use crate::utils::version;

#[derive(Parser, Debug)]
#[command(author, version = version(), about)]
pub struct Cli {
    #[arg(
        short,
        long,
        value_name = "FLOAT",
        help = "Tick rate, i.e. number of ticks per second",
        default_value_t = 4.0
    )]
    pub tick_rate: f64,

    #[arg(
        short,
        long,
        value_name = "FLOAT",
        help = "Frame rate, i.e. number of frames per second",
        default_value_t = 30.0
    )]
    pub frame_rate: f64,

    #[arg(
        short,
        long,
        value_name = "DIGITS",
        help = "Fractional digits of the amount field (overrides the config)"
    )]
    pub scale: Option<u8>,

    #[arg(
        short,
        long,
        value_name = "MILLIS",
        help = "Search debounce in milliseconds (overrides the config)"
    )]
    pub debounce_ms: Option<u64>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["formfields"]).unwrap();
        assert_eq!(cli.tick_rate, 4.0);
        assert_eq!(cli.frame_rate, 30.0);
        assert_eq!(cli.scale, None);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from(["formfields", "--scale", "3", "-d", "150"]).unwrap();
        assert_eq!(cli.scale, Some(3));
        assert_eq!(cli.debounce_ms, Some(150));
    }
}
