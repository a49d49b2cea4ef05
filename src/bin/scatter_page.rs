use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use scatter_rs::FileLoader;
use scatter_rs::core::{DatasetValidation, Viewport};
use scatter_rs::render::SvgRenderer;
use scatter_rs::runtime::{PageConfig, PageSession, initialize};

const DEFAULT_OUTPUT: &str = "scatter.svg";

struct CliArgs {
    root: PathBuf,
    config_path: Option<PathBuf>,
    data: Option<String>,
    selector: Option<String>,
    validation: Option<DatasetValidation>,
    window: Viewport,
    resizes: Vec<Viewport>,
    output: PathBuf,
}

fn main() {
    let _ = scatter_rs::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;

    let mut config = match &args.config_path {
        Some(path) => {
            let raw = fs::read_to_string(path).map_err(|err| {
                format!("failed to read config `{}`: {err}", path.display())
            })?;
            PageConfig::from_json_str(&raw).map_err(|err| err.to_string())?
        }
        None => PageConfig::default(),
    };
    if let Some(data) = args.data {
        config.resource_path = data;
    }
    if let Some(selector) = args.selector {
        config.surface_selector = selector;
    }
    if let Some(validation) = args.validation {
        config.validation = validation;
    }

    let mut session = PageSession::new(args.window);
    session
        .add_surface(config.surface_selector.clone(), SvgRenderer::new())
        .map_err(|err| err.to_string())?;

    let loader = Rc::new(FileLoader::new(&args.root));
    let handle = initialize(&mut session, loader, &config).map_err(|err| err.to_string())?;
    println!(
        "mounted `{}` with {} point(s) at {}x{}",
        handle.selector(),
        handle.rendered_point_count(),
        args.window.width,
        args.window.height
    );

    for viewport in &args.resizes {
        session
            .resize_window(*viewport)
            .map_err(|err| err.to_string())?;
        println!(
            "resized to {}x{} (update #{})",
            viewport.width,
            viewport.height,
            handle.update_count()
        );
    }

    let surface = handle.surface().borrow();
    surface
        .renderer()
        .write_to(&args.output)
        .map_err(|err| err.to_string())?;
    println!("wrote {}", args.output.display());
    Ok(())
}

fn parse_args() -> Result<CliArgs, String> {
    let mut root = PathBuf::from(".");
    let mut config_path = None;
    let mut data = None;
    let mut selector = None;
    let mut validation = None;
    let mut width = Viewport::default().width;
    let mut height = Viewport::default().height;
    let mut resizes = Vec::new();
    let mut output = PathBuf::from(DEFAULT_OUTPUT);

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value_for = |flag: &str| {
            args.next()
                .ok_or_else(|| format!("missing value for {flag}"))
        };
        match arg.as_str() {
            "--root" => root = PathBuf::from(value_for("--root")?),
            "--config" => config_path = Some(PathBuf::from(value_for("--config")?)),
            "--data" => data = Some(value_for("--data")?),
            "--selector" => selector = Some(value_for("--selector")?),
            "--validation" => validation = Some(parse_validation(&value_for("--validation")?)?),
            "--width" => width = parse_dimension("--width", &value_for("--width")?)?,
            "--height" => height = parse_dimension("--height", &value_for("--height")?)?,
            "--resize" => resizes.push(parse_size(&value_for("--resize")?)?),
            "--output" => output = PathBuf::from(value_for("--output")?),
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            _ => {
                return Err(format!("unknown argument `{arg}`\n\n{}", usage_message()));
            }
        }
    }

    Ok(CliArgs {
        root,
        config_path,
        data,
        selector,
        validation,
        window: Viewport::new(width, height),
        resizes,
        output,
    })
}

fn parse_validation(value: &str) -> Result<DatasetValidation, String> {
    match value {
        "passthrough" => Ok(DatasetValidation::Passthrough),
        "reject_empty" => Ok(DatasetValidation::RejectEmpty),
        "strict" => Ok(DatasetValidation::Strict),
        other => Err(format!(
            "invalid --validation `{other}` (expected passthrough, reject_empty or strict)"
        )),
    }
}

fn parse_dimension(flag: &str, value: &str) -> Result<u32, String> {
    match value.parse::<u32>() {
        Ok(parsed) if parsed > 0 => Ok(parsed),
        _ => Err(format!("invalid {flag} `{value}` (expected a positive integer)")),
    }
}

fn parse_size(value: &str) -> Result<Viewport, String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("invalid --resize `{value}` (expected WIDTHxHEIGHT)"))?;
    Ok(Viewport::new(
        parse_dimension("--resize", width)?,
        parse_dimension("--resize", height)?,
    ))
}

fn print_usage() {
    println!("{}", usage_message());
}

fn usage_message() -> String {
    format!(
        "Usage: scatter_page [options]\n\nOptions:\n  --root <dir>          Directory resource paths resolve against (default: .)\n  --data <path>         Dataset resource path (default: data/data.json)\n  --config <file>       PageConfig JSON document\n  --selector <name>     Surface selector (default: #scatterchart svg)\n  --validation <mode>   passthrough | reject_empty | strict\n  --width <px>          Initial window width (default: 960)\n  --height <px>         Initial window height (default: 500)\n  --resize <WxH>        Replay a window resize; repeatable\n  --output <file>       SVG output path (default: {DEFAULT_OUTPUT})\n  -h, --help            Show this message"
    )
}
