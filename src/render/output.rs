use super::figure::{Figure, ImageFigure, Panel};
use super::raster::{rasterize, shade_lines, write_pgm};
use super::text_plot::render_figure;
use super::RenderError;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Somewhere figures go.
pub trait Presenter {
    fn present(&mut self, figure: &Figure) -> Result<(), RenderError>;

    fn present_image(&mut self, figure: &ImageFigure) -> Result<(), RenderError>;

    fn present_panel(&mut self, panel: &Panel) -> Result<(), RenderError> {
        match panel {
            Panel::Plot(f) => self.present(f),
            Panel::Image(f) => self.present_image(f),
        }
    }
}

/// Lowercase ASCII alphanumerics joined by single dashes.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        slug.push_str("figure");
    }
    slug
}

/// Writes character plots to any `Write`, typically stdout.
pub struct TextPresenter<W: Write> {
    out: W,
    width: usize,
    height: usize,
}

impl<W: Write> TextPresenter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            width: 72,
            height: 16,
        }
    }

    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for TextPresenter<W> {
    fn present(&mut self, figure: &Figure) -> Result<(), RenderError> {
        writeln!(self.out, "{}", render_figure(figure, self.width, self.height))?;
        Ok(())
    }

    fn present_image(&mut self, figure: &ImageFigure) -> Result<(), RenderError> {
        let image = &figure.image;
        let (lo, hi) = image.min_max();
        writeln!(
            self.out,
            "== {} == ({}x{}, range {lo:.3e}..{hi:.3e})",
            figure.title,
            image.width(),
            image.height()
        )?;
        for line in shade_lines(&rasterize(image), self.width) {
            writeln!(self.out, "{line}")?;
        }
        writeln!(self.out)?;
        Ok(())
    }
}

/// Output directory plus a record of every file written to it.
#[derive(Debug)]
struct OutputDir {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl OutputDir {
    fn create(dir: impl Into<PathBuf>) -> Result<Self, RenderError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            written: Vec::new(),
        })
    }

    /// Path for `stem.ext`, suffixed with a counter if already used.
    fn reserve(&mut self, stem: &str, ext: &str) -> PathBuf {
        let mut path = self.dir.join(format!("{stem}.{ext}"));
        let mut n = 2;
        while self.written.contains(&path) {
            path = self.dir.join(format!("{stem}-{n}.{ext}"));
            n += 1;
        }
        self.written.push(path.clone());
        path
    }

    fn write_pgm(&mut self, figure: &ImageFigure) -> Result<(), RenderError> {
        let path = self.reserve(&slugify(&figure.title), "pgm");
        let mut file = BufWriter::new(File::create(&path)?);
        write_pgm(&rasterize(&figure.image), &mut file)?;
        file.flush()?;
        log::info!("wrote {}", path.display());
        Ok(())
    }
}

/// One pretty-printed JSON document per figure.
#[derive(Debug)]
pub struct JsonPresenter {
    out: OutputDir,
}

impl JsonPresenter {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, RenderError> {
        Ok(Self {
            out: OutputDir::create(dir)?,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.out.dir
    }

    pub fn written(&self) -> &[PathBuf] {
        &self.out.written
    }
}

impl Presenter for JsonPresenter {
    fn present(&mut self, figure: &Figure) -> Result<(), RenderError> {
        let path = self.out.reserve(&slugify(&figure.title), "json");
        let mut file = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut file, figure)?;
        file.flush()?;
        log::info!("wrote {}", path.display());
        Ok(())
    }

    fn present_image(&mut self, figure: &ImageFigure) -> Result<(), RenderError> {
        self.out.write_pgm(figure)
    }
}

/// One `x,y` CSV per trace, named `<figure>-<trace>.csv`.
#[derive(Debug)]
pub struct CsvPresenter {
    out: OutputDir,
}

impl CsvPresenter {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, RenderError> {
        Ok(Self {
            out: OutputDir::create(dir)?,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.out.dir
    }

    pub fn written(&self) -> &[PathBuf] {
        &self.out.written
    }
}

impl Presenter for CsvPresenter {
    fn present(&mut self, figure: &Figure) -> Result<(), RenderError> {
        let figure_slug = slugify(&figure.title);
        for trace in &figure.traces {
            let stem = format!("{figure_slug}-{}", slugify(&trace.name));
            let path = self.out.reserve(&stem, "csv");
            let mut file = BufWriter::new(File::create(&path)?);
            writeln!(file, "x,y")?;
            for (x, y) in trace.x.iter().zip(&trace.y) {
                writeln!(file, "{x},{y}")?;
            }
            file.flush()?;
            log::info!("wrote {}", path.display());
        }
        Ok(())
    }

    fn present_image(&mut self, figure: &ImageFigure) -> Result<(), RenderError> {
        self.out.write_pgm(figure)
    }
}
