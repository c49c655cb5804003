use spectra::render::output::slugify;
use spectra::settings::OutputSettings;
use spectra::{
    present_all, CsvPresenter, DemoKind, DemoSettings, JsonPresenter, OutputFormat, Panel,
    TextPresenter,
};
use std::fs;
use std::path::PathBuf;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("spectra-demos-{name}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

fn seeded() -> DemoSettings {
    DemoSettings {
        seed: Some(2024),
        ..Default::default()
    }
}

#[test]
fn every_demo_renders_as_text() {
    let settings = seeded();
    let mut presenter = TextPresenter::new(Vec::new()).with_size(60, 12);
    for demo in DemoKind::ALL {
        let panels = demo.run(&settings).unwrap();
        assert!(!panels.is_empty(), "{} produced nothing", demo.name());
        present_all(&mut presenter, &panels).unwrap();
    }
    let text = String::from_utf8(presenter.into_inner()).unwrap();
    assert!(text.contains("== Time-domain signal =="));
    assert!(text.contains("== Welch's method =="));
    assert!(text.contains("== Gaussian blur =="));
    assert!(text.contains("[dB re max]"));
    assert!(text.contains("== Pressure field 30/30"));
}

#[test]
fn seeded_runs_are_reproducible() {
    let a = DemoKind::Psd.run(&seeded()).unwrap();
    let b = DemoKind::Psd.run(&seeded()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn field_frames_write_as_pgm() {
    let dir = scratch_dir("field");
    let panels = DemoKind::Field.run(&seeded()).unwrap();
    let mut presenter = CsvPresenter::new(&dir).unwrap();
    present_all(&mut presenter, &panels).unwrap();
    assert_eq!(presenter.written().len(), 30);

    let first = fs::read(dir.join(format!("{}.pgm", slugify(panels[0].title())))).unwrap();
    assert!(first.starts_with(b"P5\n256 256\n255\n"));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn json_output_has_one_file_per_panel() {
    let dir = scratch_dir("json");
    let panels = DemoKind::Signal.run(&seeded()).unwrap();
    let mut presenter = JsonPresenter::new(&dir).unwrap();
    present_all(&mut presenter, &panels).unwrap();
    assert_eq!(presenter.written().len(), panels.len());

    let text = fs::read_to_string(dir.join("welch-s-method.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["y_scale"], "log");
    assert_eq!(value["traces"].as_array().unwrap().len(), 2);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn csv_output_writes_traces_and_images() {
    let dir = scratch_dir("csv");
    let mut presenter = CsvPresenter::new(&dir).unwrap();
    let mut expected = 0;
    for demo in [DemoKind::Fft, DemoKind::Image] {
        let panels = demo.run(&seeded()).unwrap();
        expected += panels
            .iter()
            .map(|p| match p {
                Panel::Plot(f) => f.traces.len(),
                Panel::Image(_) => 1,
            })
            .sum::<usize>();
        present_all(&mut presenter, &panels).unwrap();
    }
    assert_eq!(presenter.written().len(), expected);

    let pgm = fs::read(dir.join(format!("{}.pgm", slugify("Gaussian blur")))).unwrap();
    assert!(pgm.starts_with(b"P5\n256 256\n255\n"));

    let csv = fs::read_to_string(dir.join("frequency-spectrum-clean.csv")).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("x,y"));
    assert_eq!(lines.count(), 251);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn settings_layers_override_in_order() {
    let dir = scratch_dir("settings");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("run.yaml");
    fs::write(&path, "f0: 12.0\nnum_samples: 1000\noutput:\n  format: csv\n").unwrap();

    let file = spectra::load_settings(&path).unwrap();
    let flags = DemoSettings {
        num_samples: Some(800),
        seed: Some(1),
        output: OutputSettings {
            format: None,
            dir: Some(dir.join("out")),
        },
        ..Default::default()
    };
    let settings = file.merge(flags);
    assert_eq!(settings.f0, Some(12.0));
    assert_eq!(settings.num_samples, Some(800));
    assert_eq!(settings.output.format(), OutputFormat::Csv);

    // The psd demo zooms to twice the configured tone.
    let panels = DemoKind::Psd.run(&settings).unwrap();
    match &panels[1] {
        Panel::Plot(f) => assert_eq!(f.x_limit, Some((0.0, 24.0))),
        Panel::Image(_) => panic!("expected a plot"),
    }
    let _ = fs::remove_dir_all(&dir);
}
