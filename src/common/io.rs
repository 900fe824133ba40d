//! Common, IO-related code.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use flate2::{bufread::MultiGzDecoder, write::GzEncoder, Compression};

fn is_gzip<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().extension().map(|s| s.to_str()) == Some(Some("gz"))
}

/// Transparently open a file with gzip decoder.
pub fn open_read_maybe_gz<P>(path: P) -> Result<Box<dyn BufRead>, anyhow::Error>
where
    P: AsRef<Path>,
{
    if is_gzip(&path) {
        tracing::trace!("Opening {:?} as gzip for reading", path.as_ref());
        let file = File::open(path)?;
        let bufreader = BufReader::new(file);
        let decoder = MultiGzDecoder::new(bufreader);
        Ok(Box::new(BufReader::new(decoder)))
    } else {
        tracing::trace!("Opening {:?} as plain text for reading", path.as_ref());
        let file = File::open(path)?;
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Transparently open a file with gzip encoder.
pub fn open_write_maybe_gz<P>(path: P) -> Result<Box<dyn Write>, anyhow::Error>
where
    P: AsRef<Path>,
{
    if is_gzip(&path) {
        tracing::trace!("Opening {:?} as gzip for writing", path.as_ref());
        let file = File::create(path)?;
        let bufwriter = BufWriter::new(file);
        let encoder = GzEncoder::new(bufwriter, Compression::default());
        Ok(Box::new(encoder))
    } else {
        tracing::trace!("Opening {:?} as plain text for writing", path.as_ref());
        let file = File::create(path)?;
        Ok(Box::new(BufWriter::new(file)))
    }
}

/// Read a report JSON file, optionally gzip-compressed.
pub fn read_report<P>(path: P) -> Result<crate::hl7::input::Report, anyhow::Error>
where
    P: AsRef<Path>,
{
    let reader = open_read_maybe_gz(&path)?;
    serde_json::from_reader(reader)
        .map_err(|e| anyhow::anyhow!("could not parse report {:?}: {}", path.as_ref(), e))
}

#[cfg(test)]
mod test {
    use std::io::{Read, Write};

    use pretty_assertions::assert_eq;

    #[rstest::rstest]
    #[case("body.hl7")]
    #[case("body.hl7.gz")]
    fn write_then_read(#[case] filename: &str) -> Result<(), anyhow::Error> {
        let tmp_dir = temp_testdir::TempDir::default();
        let path = tmp_dir.join(filename);

        {
            let mut f = super::open_write_maybe_gz(&path)?;
            f.write_all(b"MSH|^~\\&|RRH\r\nORC|RE\r\n")?;
            f.flush()?;
        }

        let mut buf = String::new();
        super::open_read_maybe_gz(&path)?.read_to_string(&mut buf)?;
        assert_eq!(buf, "MSH|^~\\&|RRH\r\nORC|RE\r\n");

        let mut raw = Vec::new();
        std::fs::File::open(&path)?.read_to_end(&mut raw)?;
        assert_eq!(raw.starts_with(&[0x1f, 0x8b]), filename.ends_with(".gz"));

        Ok(())
    }

    #[test]
    fn read_report_fixture() -> Result<(), anyhow::Error> {
        let report = super::read_report("tests/hl7/report.json")?;

        assert_eq!(report.sample_state.panel, "UCLA Pan-Cancer All v1");

        Ok(())
    }

    #[test]
    fn read_report_invalid() -> Result<(), anyhow::Error> {
        let tmp_dir = temp_testdir::TempDir::default();
        let path = tmp_dir.join("broken.json");
        std::fs::write(&path, "{\"sampleState\": ")?;

        assert!(super::read_report(&path).is_err());

        Ok(())
    }
}
