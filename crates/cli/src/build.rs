use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::process::Command;
use std::time::Instant;

use lol_html::html_content::{ContentType, Element};
use lol_html::{element, rewrite_str, RewriteStrSettings};

use crate::log;
use crate::manifest::{manifest, Manifest};
use crate::report::{Error, ErrorExt, Report};
use crate::watch::watch;
use crate::Build;

/// Shell used when the crate has no `index.html` of its own.
const INDEX_TEMPLATE: &str = include_str!("../assets/index.html");

pub fn run(b: &Build) -> Report<()> {
    let manifest = manifest(b.package.as_deref())?;

    if b.watch {
        // A broken first build shouldn't stop the watcher from starting.
        if let Err(err) = build(b, &manifest) {
            log::error!("{err}");
        }

        watch(b, &manifest)
    } else {
        build(b, &manifest)
    }
}

pub fn build(b: &Build, m: &Manifest) -> Report<()> {
    let start = Instant::now();

    log::building!("{} v{} ({})", m.crate_name, m.crate_version, m.root.display());

    build_wasm(&m.crate_name, b.release)?;

    let mut compiled = m.target.join("wasm32-unknown-unknown");
    compiled.push(if b.release { "release" } else { "debug" });
    compiled.push(&m.artifact);
    compiled.set_extension("wasm");

    if !compiled.exists() {
        return Err(Error::message(format!(
            "couldn't find compiled .wasm: {}",
            compiled.display(),
        )));
    }

    log::bundling!("{} into {}", compiled.display(), b.dist.display());

    run_wasm_bindgen(&compiled, &b.dist)?;

    let wasm = b.dist.join(format!("{}_bg.wasm", m.artifact));
    let js = b.dist.join(format!("{}.js", m.artifact));

    if b.release {
        let start = Instant::now();

        optimize_wasm(&wasm)?;

        log::optimized!("`{}` in {:.2?}", wasm.display(), start.elapsed());
    }

    let snippets_dir = b.dist.join("snippets");
    let snippets = if snippets_dir.is_dir() {
        read_file_paths(&snippets_dir)
            .with_message(|| format!("failed to read {} directory", snippets_dir.display()))?
    } else {
        Vec::new()
    };

    let assets = Assets::new(&b.dist, &js, &wasm, &snippets)?;

    let orig_index = m.root.join("index.html");
    let html = match fs::read_to_string(&orig_index) {
        Ok(html) => html,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            log::info!("no {}, using the default shell", orig_index.display());

            INDEX_TEMPLATE.to_owned()
        }
        Err(err) => {
            return Err(Error::new(
                err,
                format!("failed to read {}", orig_index.display()),
            ))
        }
    };

    let html = rewrite_index(&html, &assets)
        .map_err(|err| Error::message(format!("{}: {err}", orig_index.display())))?;

    let index = b.dist.join("index.html");
    fs::write(&index, html).with_message(|| format!("failed to write {}", index.display()))?;

    log::finished!("`{}` in {:.2?}", index.display(), start.elapsed());

    Ok(())
}

fn build_wasm(package: &str, release: bool) -> Report<()> {
    let mut cargo = Command::new("cargo");
    cargo.args(["build", "--target=wasm32-unknown-unknown", "--package", package]);

    if release {
        cargo.arg("--release");
    }

    let status = cargo
        .spawn()
        .message("failed to run cargo")?
        .wait()
        .message("failed to build cargo crate")?;

    if status.success() {
        Ok(())
    } else {
        Err(Error::message(format!("failed to build `{package}`")))
    }
}

fn run_wasm_bindgen(wasm: &Path, dist: &Path) -> Report<()> {
    let out = Command::new("wasm-bindgen")
        .arg(wasm)
        .arg("--out-dir")
        .arg(dist)
        .args(["--target=web", "--no-typescript"])
        .output()
        .message("failed to run wasm-bindgen")?;

    if out.status.success() {
        Ok(())
    } else {
        let err = String::from_utf8_lossy(&out.stderr);
        Err(Error::message(format!("failed to run wasm-bindgen\n{err}")))
    }
}

fn optimize_wasm(file: &Path) -> Report<()> {
    let status = Command::new("wasm-opt")
        .arg("-Os")
        .arg(file)
        .arg("-o")
        .arg(file)
        .args(["--enable-simd", "--low-memory-unused"])
        .spawn()
        .message("failed to run wasm-opt")?
        .wait()
        .message("failed to optimize wasm")?;

    if status.success() {
        Ok(())
    } else {
        Err(Error::message(format!("wasm-opt failed on {}", file.display())))
    }
}

fn read_file_paths(path: &Path) -> io::Result<Vec<PathBuf>> {
    let mut paths = vec![];
    let mut to_visit = vec![Cow::Borrowed(path)];
    while let Some(dir) = to_visit.pop() {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let file_type = entry.file_type()?;
            if file_type.is_file() {
                paths.push(entry.path());
            } else if file_type.is_dir() {
                to_visit.push(Cow::Owned(entry.path()));
            }
        }
    }

    // `read_dir` order is platform dependent, keep the emitted html stable.
    paths.sort();

    Ok(paths)
}

/// Absolute URL of a file inside `dist`, as served from the dist root.
fn url(dist: &Path, path: &Path) -> Report<String> {
    let relative = path.strip_prefix(dist).map_err(|_| {
        Error::message(format!(
            "{} is not inside {}",
            path.display(),
            dist.display(),
        ))
    })?;

    let mut url = String::new();
    for component in relative.components() {
        if let Component::Normal(part) = component {
            url.push('/');
            url.push_str(&part.to_string_lossy());
        }
    }

    Ok(url)
}

/// URLs of everything the page needs to load the bundle.
#[derive(Debug)]
struct Assets {
    js: String,
    wasm: String,
    snippets: Vec<String>,
}

impl Assets {
    fn new(dist: &Path, js: &Path, wasm: &Path, snippets: &[PathBuf]) -> Report<Self> {
        let snippets: Vec<String> = snippets
            .iter()
            .filter(|p| p.extension().is_some_and(|ext| ext == "js"))
            .map(|p| url(dist, p))
            .collect::<Report<_>>()?;

        Ok(Assets {
            js: url(dist, js)?,
            wasm: url(dist, wasm)?,
            snippets,
        })
    }

    fn links(&self) -> String {
        let mut links = format!(
            "<link rel=\"modulepreload\" href=\"{}\" crossorigin=anonymous>\n\
             <link rel=\"preload\" href=\"{}\" crossorigin=anonymous as=\"fetch\" type=\"application/wasm\">\n",
            self.js, self.wasm,
        );

        for snippet in &self.snippets {
            links.push_str(&format!(
                "<link rel=\"modulepreload\" href=\"{snippet}\" crossorigin=anonymous>\n"
            ));
        }

        links
    }

    fn script(&self) -> String {
        format!(
            "<script type=\"module\">\n\
                import init from '{}';\n\
                await init({{ module_or_path: '{}' }});\n\
            </script>\n",
            self.js, self.wasm,
        )
    }
}

/// Inject preload links into `<head>` and the bootstrap script into `<body>`.
fn rewrite_index(html: &str, assets: &Assets) -> Report<String> {
    let links = assets.links();
    let script = assets.script();

    let mut embed_links = Some(|el: &mut Element| el.append(&links, ContentType::Html));
    let mut embed_script = Some(|el: &mut Element| el.append(&script, ContentType::Html));

    let settings = RewriteStrSettings {
        element_content_handlers: vec![
            element!("head", |el| {
                if let Some(f) = embed_links.take() {
                    f(el);
                }

                Ok(())
            }),
            element!("body", |el| {
                if let Some(f) = embed_script.take() {
                    f(el);
                }

                Ok(())
            }),
        ],
        ..RewriteStrSettings::new()
    };

    let html = rewrite_str(html, settings).message("failed to rewrite html")?;

    if embed_links.is_some() {
        return Err(Error::message("<head> tag not found"));
    }

    if embed_script.is_some() {
        return Err(Error::message("<body> tag not found"));
    }

    Ok(html)
}
