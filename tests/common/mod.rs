#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use dsg_lib::DsgOutput;
use serde_json::json;

pub fn bin_path() -> PathBuf {
    std::env::var("CARGO_BIN_EXE_dsg")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            Path::new(env!("CARGO_MANIFEST_DIR"))
                .join("target")
                .join("debug")
                .join(if cfg!(windows) { "dsg.exe" } else { "dsg" })
        })
}

/// Command with `HOME` pointed at `home` so no central config is picked up.
pub fn dsg(home: &Path) -> Command {
    let mut cmd = Command::new(bin_path());
    cmd.env("HOME", home).env_remove("RUST_LOG");
    cmd
}

pub fn run_cmd(home: &Path, args: &[&str]) -> Output {
    dsg(home).args(args).output().expect("run dsg command")
}

pub fn parse_json(stdout: &[u8]) -> DsgOutput {
    let text = String::from_utf8_lossy(stdout);
    serde_json::from_str(text.trim()).unwrap_or_else(|e| panic!("invalid JSON output {e}: {text}"))
}

/// A small canvas: two red shapes, one blue, two text styles and a component.
pub fn write_fixture(dir: &Path) -> PathBuf {
    let doc = json!({
        "name": "Marketing site",
        "pages": [
            {
                "id": "0:1",
                "name": "Home",
                "type": "PAGE",
                "children": [
                    {
                        "id": "1:1", "name": "Hero", "type": "SHAPE",
                        "width": 200, "height": 100,
                        "fills": [{"type": "SOLID", "color": {"r": 1, "g": 0, "b": 0}}]
                    },
                    {
                        "id": "1:2", "name": "Badge", "type": "SHAPE",
                        "width": 20, "height": 20,
                        "fills": [{"type": "SOLID", "color": {"r": 1, "g": 0, "b": 0}}]
                    },
                    {
                        "id": "1:3", "name": "Footer", "type": "FRAME",
                        "width": 1200, "height": 80,
                        "fills": [{"type": "SOLID", "color": {"r": 0, "g": 0, "b": 1}}],
                        "children": [
                            {
                                "id": "1:4", "name": "Copyright", "type": "TEXT",
                                "characters": "All rights reserved",
                                "fontName": {"family": "Inter", "style": "Regular"},
                                "fontSize": 12
                            }
                        ]
                    },
                    {
                        "id": "1:5", "name": "Headline", "type": "TEXT",
                        "characters": "Ship faster",
                        "fontName": {"family": "Inter", "style": "Bold"},
                        "fontSize": 48
                    },
                    {
                        "id": "2:1", "name": "Button", "type": "COMPONENT",
                        "width": 80, "height": 40
                    }
                ]
            },
            {
                "id": "0:2",
                "name": "Empty",
                "type": "PAGE"
            }
        ]
    });
    let path = dir.join("canvas.json");
    std::fs::write(&path, serde_json::to_string_pretty(&doc).expect("fixture json"))
        .expect("write fixture");
    path
}
