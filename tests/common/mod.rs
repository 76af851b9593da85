#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};

/// Export with entries in weeks 10, 11 and 13 of 2024 and one broken block
pub const SAMPLE_DIARY: &str = "Injection Diary\n\
exported 03/30/24\n\
<div>3/5/24</div>\n\
<div>arm</div>\n\
<div>felt fine</div>\n\
<div>slight redness</div>\n\
<div><br></div>\n\
<div>3/12/24</div>\n\
<div>thigh</div>\n\
<div><br></div>\n\
<div>3/7/24</div>\n\
<div>belly</div>\n\
<div>itchy</div>\n\
<div><br></div>\n\
<div>not a date</div>\n\
<div>arm</div>\n\
<div><br></div>\n\
<div>3/26/2024</div>\n\
<div>leg</div>\n";

pub fn diary_cmd() -> Command {
    let mut cmd = Command::cargo_bin("injdiary").unwrap();
    cmd.env_remove("INJDIARY_FILE");
    cmd.env_remove("RUST_LOG");
    cmd
}

pub fn write_diary(dir: &Path, text: &str) -> PathBuf {
    let path = dir.join("InjectionDiary.txt");
    fs::write(&path, text).unwrap();
    path
}
