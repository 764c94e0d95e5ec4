use std::{
    fs::File,
    io::{self, BufWriter, Read, Write},
    path::PathBuf,
};

use anyhow::Context as _;
use clap::Parser;
use textcascade::{AnimationConfig, CascadeDirection, LayoutConfig, Renderer, TimingFunction};
use tracing::Level;

const DEFAULT_CHAR_WIDTH: usize = 10;
const DEFAULT_LINE_HEIGHT: usize = 20;

/// Render monospace text (e.g. piped ASCII art) as an SVG with per-glyph color cascades.
#[derive(Parser, Debug)]
#[command(name = "textcascade", version)]
struct Cli {
    /// Text to render. Read from stdin when neither --text, --file nor --url is given.
    #[arg(long, conflicts_with = "file")]
    text: Option<String>,

    /// File holding the text to render.
    #[arg(long)]
    file: Option<PathBuf>,

    /// Fetch the text with a plain-text GET from this URL.
    #[arg(long, env = "TEXTCASCADE_URL")]
    url: Option<String>,

    /// Comma separated color cycle, e.g. `red,#00ff00,rgb(0, 0, 255)`.
    #[arg(long, env = "TEXTCASCADE_COLORS", default_value = "")]
    colors: String,

    /// Seconds per color cycle; 0 renders statically.
    #[arg(long, env = "TEXTCASCADE_DURATION", default_value = "0", allow_negative_numbers = true)]
    duration: String,

    /// CSS timing function (keyword or `steps(N, position)`). Defaults to one step per color.
    #[arg(long, env = "TEXTCASCADE_TIMING")]
    timing: Option<String>,

    /// Cascade mode: ltr, rtl, ttb, btt, diag-tlbr, diag-trbl, diag-bltr, diag-brtl,
    /// center-out, edges-in, ttb-linesync, btt-linesync, full-sync.
    #[arg(long, env = "TEXTCASCADE_CASCADE", default_value = "rtl")]
    cascade: String,

    /// Width of one glyph cell in pixels.
    #[arg(long, env = "TEXTCASCADE_CHAR_WIDTH", default_value_t = DEFAULT_CHAR_WIDTH as i64, allow_negative_numbers = true)]
    char_width: i64,

    /// Distance between baselines in pixels.
    #[arg(long, env = "TEXTCASCADE_LINE_HEIGHT", default_value_t = DEFAULT_LINE_HEIGHT as i64, allow_negative_numbers = true)]
    line_height: i64,

    /// Never animate, even with a duration.
    #[arg(long = "static")]
    still: bool,

    /// Output SVG path; stdout when absent.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Log debug details to stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let text = read_text(&cli)?;
    let anim = animation_config(&cli)?;
    let layout = LayoutConfig::new(
        positive_or(cli.char_width, DEFAULT_CHAR_WIDTH, "char-width"),
        positive_or(cli.line_height, DEFAULT_LINE_HEIGHT, "line-height"),
    );
    let renderer = Renderer::new(layout);
    let force_static = cli.still;

    match &cli.out {
        Some(path) => {
            let f = File::create(path)
                .with_context(|| format!("create output '{}'", path.display()))?;
            let mut w = BufWriter::new(f);
            renderer
                .render(&mut w, &text, &anim, force_static)
                .with_context(|| format!("write svg '{}'", path.display()))?;
            w.flush()?;
            eprintln!("wrote {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut w = BufWriter::new(stdout.lock());
            renderer
                .render(&mut w, &text, &anim, force_static)
                .context("write svg to stdout")?;
            w.flush()?;
        }
    }
    Ok(())
}

fn read_text(cli: &Cli) -> anyhow::Result<String> {
    if let Some(text) = &cli.text {
        return Ok(text.clone());
    }
    if let Some(path) = &cli.file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("read text '{}'", path.display()));
    }
    if let Some(url) = &cli.url {
        return fetch_plain_text(url);
    }
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("read text from stdin")?;
    Ok(text)
}

/// Issues a single `Accept: text/plain` GET; transport errors and non-2xx
/// answers are returned as they are, without retrying.
fn fetch_plain_text(url: &str) -> anyhow::Result<String> {
    tracing::debug!(url, "fetching text");
    let resp = match ureq::get(url).set("Accept", "text/plain").call() {
        Ok(resp) => resp,
        Err(ureq::Error::Status(code, _)) => {
            anyhow::bail!("couldn't fetch '{}': server answered {}", url, code)
        }
        Err(err) => return Err(err).with_context(|| format!("couldn't fetch '{}'", url)),
    };
    resp.into_string()
        .with_context(|| format!("read body of '{}'", url))
}

fn animation_config(cli: &Cli) -> anyhow::Result<AnimationConfig> {
    let colors = AnimationConfig::parse_colors(&cli.colors);
    let direction = CascadeDirection::from_name(&cli.cascade);
    if direction == CascadeDirection::Reverse && cli.cascade.trim() != "reverse" {
        tracing::info!(requested = %cli.cascade, "unknown cascade mode, using reverse sweep");
    }
    let mut anim = AnimationConfig::new(colors, parse_duration(&cli.duration), direction)?;
    if let Some(timing) = &cli.timing {
        let timing: TimingFunction = timing
            .parse()
            .with_context(|| format!("invalid --timing '{}'", timing))?;
        anim = anim.with_timing(timing);
    }
    Ok(anim)
}

/// Unparsable or negative durations mean "no animation".
fn parse_duration(s: &str) -> f64 {
    match s.trim().parse::<f64>() {
        Ok(d) if d.is_finite() && d >= 0.0 => d,
        _ => {
            tracing::warn!(input = s, "ignoring invalid duration");
            0.0
        }
    }
}

fn positive_or(value: i64, default: usize, name: &str) -> usize {
    if value > 0 {
        value as usize
    } else {
        tracing::warn!(option = name, value, default, "non-positive metric, using default");
        default
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        io::{BufRead, BufReader},
        net::TcpListener,
        thread,
    };

    /// Answers one HTTP request with `status` and `body`; the handle yields the request head.
    fn serve_once(status: &'static str, body: &'static str) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/moo", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut head = String::new();
            loop {
                let mut line = String::new();
                if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                    break;
                }
                head.push_str(&line);
            }
            write!(
                stream,
                "HTTP/1.1 {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            )
            .unwrap();
            head
        });
        (url, handle)
    }

    #[test]
    fn fetch_sends_plain_text_get() {
        let (url, server) = serve_once("200 OK", " ___\n< moo >");
        let text = fetch_plain_text(&url).unwrap();
        assert_eq!(text, " ___\n< moo >");
        let head = server.join().unwrap().to_ascii_lowercase();
        assert!(head.starts_with("get /moo http/1.1"));
        assert!(head.contains("accept: text/plain"));
    }

    #[test]
    fn fetch_surfaces_status_errors() {
        let (url, server) = serve_once("503 Service Unavailable", "down");
        let err = fetch_plain_text(&url).unwrap_err();
        assert!(err.to_string().contains("503"), "{}", err);
        server.join().unwrap();
    }

    #[test]
    fn fetch_surfaces_transport_errors() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/", listener.local_addr().unwrap());
        drop(listener);
        assert!(fetch_plain_text(&url).is_err());
    }

    #[test]
    fn url_is_used_when_no_text_given() {
        let (url, server) = serve_once("200 OK", "hi");
        let cli = Cli::try_parse_from(["textcascade", "--url", url.as_str()]).unwrap();
        assert_eq!(read_text(&cli).unwrap(), "hi");
        server.join().unwrap();
    }

    #[test]
    fn bad_durations_disable_animation() {
        assert_eq!(parse_duration("1.5"), 1.5);
        assert_eq!(parse_duration("-2"), 0.0);
        assert_eq!(parse_duration("soon"), 0.0);
        assert_eq!(parse_duration("inf"), 0.0);
    }

    #[test]
    fn duration_is_validated_after_parsing_arguments() {
        let cli = Cli::try_parse_from(["textcascade", "--text", "hi", "--duration", "soon"]).unwrap();
        assert_eq!(cli.duration, "soon");
        let cli = Cli::try_parse_from([
            "textcascade",
            "--text",
            "hi",
            "--colors",
            "red",
            "--duration",
            "-1",
        ])
        .unwrap();
        let anim = animation_config(&cli).unwrap();
        assert_eq!(anim.duration, 0.0);
        assert!(anim.is_static());
    }

    #[test]
    fn metrics_fall_back_to_defaults() {
        assert_eq!(positive_or(12, 10, "w"), 12);
        assert_eq!(positive_or(0, 10, "w"), 10);
        assert_eq!(positive_or(-4, 20, "h"), 20);
    }

    #[test]
    fn cli_defaults() {
        let cli = Cli::try_parse_from(["textcascade", "--text", "hi"]).unwrap();
        let anim = animation_config(&cli).unwrap();
        assert_eq!(anim.direction, CascadeDirection::Rtl);
        assert_eq!(anim.timing.as_str(), "steps(1, end)");
        assert!(anim.is_static());
    }

    #[test]
    fn cli_rejects_unsafe_timing() {
        let cli = Cli::try_parse_from([
            "textcascade",
            "--text",
            "hi",
            "--colors",
            "red,blue",
            "--duration",
            "1",
            "--timing",
            "linear; } svg {",
        ])
        .unwrap();
        assert!(animation_config(&cli).is_err());
    }

    #[test]
    fn text_and_file_conflict() {
        assert!(Cli::try_parse_from(["textcascade", "--text", "a", "--file", "b"]).is_err());
    }
}
