use corner::{
    load_font, physical_size, Akaze, Annotator, CornerError, CornerSettings, DirectorySink,
    FrameSink, Marker, NullSink, Pipeline, PixelPoint, Result, SourceKind,
};
use log::*;
use std::path::{Path, PathBuf};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "corner",
    about = "Measures the largest object in each frame against a marker of known size"
)]
struct Opt {
    /// The marker image.
    #[structopt(parse(from_os_str))]
    marker: PathBuf,
    /// Where frames come from: an image file, a directory of images,
    /// `camera`, `camera:N` or a stream URI.
    source: String,
    /// The physical height of the marker in centimeters.
    #[structopt(long, default_value = "5.0")]
    height: f64,
    /// The physical width of the marker in centimeters.
    #[structopt(long, default_value = "5.0")]
    width: f64,
    /// The file where settings are specified.
    ///
    /// This is in the format of `corner::CornerSettings`.
    #[structopt(short, long, default_value = "corner-settings.json")]
    settings: PathBuf,
    /// Directory to write annotated frames to.
    ///
    /// If this is not provided, annotated frames are discarded.
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,
    /// A TrueType font used to label the overlay.
    #[structopt(short, long, parse(from_os_str))]
    font: Option<PathBuf>,
    /// Measure between two points, given as `x1,y1,x2,y2` in frame pixels.
    #[structopt(long, parse(try_from_str = parse_ruler))]
    ruler: Option<(PixelPoint, PixelPoint)>,
}

fn parse_ruler(s: &str) -> std::result::Result<(PixelPoint, PixelPoint), String> {
    let coordinates = s
        .split(',')
        .map(|c| c.trim().parse::<f64>().map_err(|e| format!("{}: {}", c, e)))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    match coordinates[..] {
        [x1, y1, x2, y2] => Ok((PixelPoint::new(x1, y1), PixelPoint::new(x2, y2))),
        _ => Err(format!("expected x1,y1,x2,y2 but got {} values", coordinates.len())),
    }
}

fn load_settings(path: &Path) -> Result<CornerSettings> {
    let settings = if path.exists() {
        let file = std::fs::File::open(path)?;
        let settings: CornerSettings = serde_json::from_reader(file)
            .map_err(|e| CornerError::Settings(format!("{}: {}", path.display(), e)))?;
        info!("loaded settings from {}", path.display());
        settings
    } else {
        info!("used default settings");
        CornerSettings::default()
    };
    settings.validate()?;
    Ok(settings)
}

fn run(opt: Opt) -> Result<()> {
    let settings = load_settings(&opt.settings)?;
    let physical = physical_size(opt.height, opt.width)?;
    let akaze = Akaze::new(settings.akaze_threshold);

    info!("loading marker {}", opt.marker.display());
    let marker = Marker::open(&opt.marker, physical, &settings.maximum_dimensions(), &akaze)?;
    let mut source = SourceKind::parse(&opt.source).open()?;

    let font = opt.font.as_ref().map(load_font).transpose()?;
    if font.is_none() {
        info!("no font given, labels will only be logged");
    }
    let annotator = Annotator::new(font, settings.label_scale);

    let mut sink: Box<dyn FrameSink> = match &opt.output {
        Some(directory) => Box::new(DirectorySink::create(directory)?),
        None => Box::new(NullSink),
    };

    let mut pipeline = Pipeline::with_settings(marker, &settings, annotator);
    pipeline.run(&mut source, sink.as_mut(), opt.ruler)?;
    match pipeline.calibration() {
        Some(calibration) => info!(
            "last calibration: {:.1} x {:.1} px",
            calibration.x(),
            calibration.y()
        ),
        None => warn!("the marker was never found"),
    }
    Ok(())
}

fn main() {
    pretty_env_logger::init_timed();
    let opt = Opt::from_args();
    if let Err(e) = run(opt) {
        error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ruler() {
        let (a, b) = parse_ruler("10, 20,30.5,40").unwrap();
        assert_eq!(a, PixelPoint::new(10.0, 20.0));
        assert_eq!(b, PixelPoint::new(30.5, 40.0));
        assert!(parse_ruler("1,2,3").is_err());
        assert!(parse_ruler("1,2,x,4").is_err());
    }

    #[test]
    fn missing_settings_fall_back_to_defaults() {
        let settings = load_settings(Path::new("no-such-settings.json")).unwrap();
        assert_eq!(settings, CornerSettings::default());
    }

    #[test]
    fn rejects_malformed_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_settings(&path), Err(CornerError::Settings(_))));
    }
}
