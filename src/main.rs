use countries_probe::entry;
use countries_probe::error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
