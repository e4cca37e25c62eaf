use layout_eval::{
    Evaluation, Evaluator, LayoutBounds, LayoutConfig, LayoutEdge, LayoutResult, PositionedNode,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::io::Read;

const DEFAULT_NODE_SEPARATION: f64 = 20.0;
const DEFAULT_CANVAS_WIDTH: f64 = 800.0;
const DEFAULT_CANVAS_HEIGHT: f64 = 600.0;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Eval(layout_eval::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Eval(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<layout_eval::Error> for CliError {
    fn from(value: layout_eval::Error) -> Self {
        Self::Eval(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Evaluate,
    Check,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    strict: bool,
    config_path: Option<String>,
    node_separation: Option<f64>,
    width: Option<f64>,
    height: Option<f64>,
    time_ms: Option<f64>,
}

/// Input accepted on stdin or from a file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutDocument {
    nodes: Vec<PositionedNode>,
    #[serde(default)]
    edges: Vec<LayoutEdge>,
    #[serde(default)]
    processing_time_ms: Option<f64>,
    /// Bounds reported by the layout generator; derived from the nodes when absent.
    #[serde(default)]
    bounds: Option<LayoutBounds>,
    #[serde(default)]
    config: Option<Value>,
}

fn usage() -> &'static str {
    "layout-eval-cli\n\
\n\
USAGE:\n\
  layout-eval-cli [evaluate] [--pretty] [--strict] [--config <path>] [--separation <n>] [--width <n>] [--height <n>] [--time-ms <n>] [<path>|-]\n\
  layout-eval-cli check [same options]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', the layout document is read from stdin.\n\
  - evaluate prints the evaluation as JSON; check prints a one-line verdict.\n\
  - Config precedence: built-in defaults < --config file < document `config` < flags.\n\
  - --strict exits with status 3 when the layout is not compliant.\n\
"
}

fn parse_number<'a>(it: &mut impl Iterator<Item = &'a String>) -> Result<f64, CliError> {
    let Some(raw) = it.next() else {
        return Err(CliError::Usage(usage()));
    };
    let value = raw.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
    if !value.is_finite() {
        return Err(CliError::Usage(usage()));
    }
    Ok(value)
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "evaluate" => args.command = Command::Evaluate,
            "check" => args.command = Command::Check,
            "--pretty" => args.pretty = true,
            "--strict" => args.strict = true,
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config_path = Some(path.clone());
            }
            "--separation" => args.node_separation = Some(parse_number(&mut it)?),
            "--width" => args.width = Some(parse_number(&mut it)?),
            "--height" => args.height = Some(parse_number(&mut it)?),
            "--time-ms" => args.time_ms = Some(parse_number(&mut it)?),
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl serde::Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn flag_overrides(args: &Args) -> Value {
    let mut map = Map::new();
    let flags = [
        ("nodeSeparation", args.node_separation),
        ("width", args.width),
        ("height", args.height),
    ];
    for (key, value) in flags {
        if let Some(v) = value {
            map.insert(key.to_string(), Value::from(v));
        }
    }
    Value::Object(map)
}

fn resolve_config(args: &Args, document: Option<&Value>) -> Result<LayoutConfig, CliError> {
    let mut config = LayoutConfig::new(
        DEFAULT_NODE_SEPARATION,
        DEFAULT_CANVAS_WIDTH,
        DEFAULT_CANVAS_HEIGHT,
    );
    if let Some(path) = args.config_path.as_deref() {
        let file: Value = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        config = config.with_overrides(&file)?;
    }
    if let Some(doc) = document {
        config = config.with_overrides(doc)?;
    }
    Ok(config.with_overrides(&flag_overrides(args))?)
}

fn format_verdict(evaluation: &Evaluation) -> String {
    let report = &evaluation.compliance;
    if report.compliant {
        format!(
            "compliant score={:.2} confidence={:.2}",
            report.compliance_score, evaluation.confidence
        )
    } else {
        format!(
            "non-compliant score={:.2} failed={}",
            report.compliance_score,
            report.failed_names().join(",")
        )
    }
}

/// Returns the process exit code.
fn run(args: Args) -> Result<i32, CliError> {
    let text = read_input(args.input.as_deref())?;
    let document: LayoutDocument = serde_json::from_str(&text)?;
    let config = resolve_config(&args, document.config.as_ref())?;
    let evaluator = Evaluator::new(config)?;

    let processing_time_ms = args
        .time_ms
        .or(document.processing_time_ms)
        .unwrap_or(0.0);
    tracing::debug!(
        nodes = document.nodes.len(),
        edges = document.edges.len(),
        processing_time_ms,
        "evaluating layout document"
    );

    let evaluation = match document.bounds {
        Some(bounds) => evaluator.evaluate_result(&LayoutResult {
            nodes: document.nodes,
            edges: document.edges,
            bounds,
            metrics: Default::default(),
            processing_time_ms,
        }),
        None => evaluator.evaluate(&document.nodes, &document.edges, processing_time_ms),
    };

    if !evaluation.compliance.compliant {
        tracing::info!(
            failed = %evaluation.compliance.failed_names().join(","),
            "layout is not compliant"
        );
    }

    match args.command {
        Command::Evaluate => write_json(&evaluation, args.pretty)?,
        Command::Check => println!("{}", format_verdict(&evaluation)),
    }

    if args.strict && !evaluator.accepts(&evaluation) {
        return Ok(3);
    }
    Ok(0)
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    init_tracing();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
