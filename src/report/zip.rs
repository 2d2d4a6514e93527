use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub fn write_zip(out_dir: &Path, root: &str, files: &[&str]) -> Result<PathBuf> {
    let zip_path = out_dir.join(format!("{}.zip", root));
    let tmp_path = zip_path.with_extension("zip.tmp");

    let file = File::create(&tmp_path)
        .with_context(|| format!("failed to create {}", tmp_path.display()))?;
    let mut zip = ZipWriter::new(file);
    let packed = add_report_dir(&mut zip, &out_dir.join(root), root, files)
        .and_then(|_| zip.finish().context("failed to finalize zip"));
    if let Err(e) = packed {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }
    fs::rename(&tmp_path, &zip_path)
        .with_context(|| format!("failed to move zip to {}", zip_path.display()))?;
    Ok(zip_path)
}

fn add_report_dir(
    zip: &mut ZipWriter<File>,
    report_dir: &Path,
    root: &str,
    files: &[&str],
) -> Result<()> {
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default());

    zip.add_directory(format!("{}/", root), options)
        .context("failed to add directory entry to zip")?;
    for name in files {
        let src_path = report_dir.join(name);
        let mut src = File::open(&src_path)
            .with_context(|| format!("failed to open {}", src_path.display()))?;
        zip.start_file(format!("{}/{}", root, name), options)
            .with_context(|| format!("failed to add {} to zip", name))?;
        io::copy(&mut src, zip).with_context(|| format!("failed to add {} to zip", name))?;
    }
    Ok(())
}
