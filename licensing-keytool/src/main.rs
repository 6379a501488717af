use licensing_keytool::commands::{run, Opt};
use licensing_keytool::config::get_settings;
use structopt::StructOpt;

fn main() -> anyhow::Result<()> {
    let _ = env_logger::try_init();

    let opt = Opt::from_args();
    let settings = get_settings()?;
    run(opt.cmd, &settings, &mut std::io::stdout())
}
