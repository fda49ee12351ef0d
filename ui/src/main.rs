#[macro_use]
extern crate log;

mod args;
#[cfg(feature = "window")]
mod window;

use anyhow::Result;
use structopt::StructOpt;

use model::Scene;
use render::{plotter, Display, SavePng};

use self::args::Args;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::from_args();
    let scene = Scene::load(&args.scene)?;
    let options = args.options();
    let mut display = make_display(&args)?;
    plotter(&scene, &options, display.as_mut())?;
    if options.animate {
        info!("Animation saved to {}", options.animation_path.display());
    }
    Ok(())
}

fn make_display(args: &Args) -> Result<Box<dyn Display>> {
    if let Some(ref path) = args.save {
        return Ok(Box::new(SavePng { path: path.clone() }));
    }
    #[cfg(feature = "window")]
    {
        Ok(Box::new(window::Window))
    }
    #[cfg(not(feature = "window"))]
    {
        anyhow::bail!("This build can't open windows; pass --save to write the figure to a PNG")
    }
}
