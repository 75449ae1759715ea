use clap::Parser;

use super::ProbeArgs;

pub(crate) fn parse_test_args<I, T>(args: I) -> Result<ProbeArgs, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    ProbeArgs::try_parse_from(args)
}
