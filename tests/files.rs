use anyhow::Result;
use attrexp::read::{read_expression, read_file, read_file_all, read_named,
                    write_file, ReadError};
use attrexp::value::{attribute, integer, list, string};
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("attrexp-{}-{}", std::process::id(), name))
}

#[test]
fn reads_one_expression_from_a_reader() -> Result<()> {
    let e = read_expression("(a b=2)".as_bytes())?;
    assert_eq!(e, list(vec![string("a"), attribute("b", integer(2))]));
    Ok(())
}

#[test]
fn write_then_read_a_file() -> Result<()> {
    let path = temp_path("roundtrip.txt");
    let vals = vec![list(vec![string("x y"), integer(3)]), string("z")];
    write_file(&path, &vals)?;
    assert_eq!(std::fs::read_to_string(&path)?, "(\"x y\" 3)\n\nz\n");
    assert_eq!(read_file_all(&path)?, vals);
    assert_eq!(read_file(&path)?, vals[0]);
    std::fs::remove_file(&path)?;
    Ok(())
}

#[test]
fn parse_errors_name_the_file() -> Result<()> {
    let path = temp_path("broken.txt");
    std::fs::write(&path, "(a\n  (b c)")?;
    let e = read_file(&path).unwrap_err();
    assert!(matches!(e.err, ReadError::Parse(_)));
    assert_eq!(e.to_string(), format!("unterminated list in {:?}@1.0", path));
    std::fs::remove_file(&path)?;
    Ok(())
}

#[test]
fn missing_file() {
    let path = temp_path("does-not-exist.txt");
    let e = read_file(&path).unwrap_err();
    assert!(matches!(e.err, ReadError::IO(_)));
    assert!(e.to_string().starts_with(&format!("{:?}: ", path)));
}

#[test]
fn invalid_utf8() {
    let bytes: &[u8] = b"(a \xc3\x28)";
    let e = read_named(bytes, "stdin").unwrap_err();
    assert_eq!(e.to_string(), "invalid UTF-8 from (stdin)@1.3");
}
