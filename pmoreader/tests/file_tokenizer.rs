use std::io::Write;

use pmoreader::{
    from_file, token::Uint32Le, ReaderError, Tokenizer, TokenizerExt,
};

fn temp_file(content: &[u8]) -> Result<tempfile::NamedTempFile, std::io::Error> {
    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(content)?;
    file.flush()?;
    Ok(file)
}

#[tokio::test]
async fn file_reports_size_and_reads_sequentially() -> Result<(), Box<dyn std::error::Error>> {
    let file = temp_file(b"\x01\x00\x00\x00payload")?;
    let mut tokenizer = from_file(file.path()).await?;

    assert_eq!(tokenizer.file_info().size, Some(11));
    assert_eq!(tokenizer.file_info().path.as_deref(), Some(file.path()));
    assert!(tokenizer.supports_random_access());

    assert_eq!(tokenizer.read_token::<Uint32Le>().await?, 1);
    let mut peeked = [0u8; 3];
    tokenizer.peek_exact(&mut peeked).await?;
    assert_eq!(&peeked, b"pay");
    assert_eq!(tokenizer.position(), 4);

    let rest = tokenizer.read_vec(7).await?;
    assert_eq!(rest, b"payload");
    Ok(())
}

#[tokio::test]
async fn random_read_is_independent_of_cursor() -> Result<(), Box<dyn std::error::Error>> {
    let mut content = vec![0u8; 200];
    content[72..75].copy_from_slice(b"TAG");
    let file = temp_file(&content)?;
    let mut tokenizer = from_file(file.path()).await?;

    tokenizer.ignore(10).await?;
    let mut trailer = [0u8; 128];
    let read = tokenizer.random_read(&mut trailer, 72).await?;
    assert_eq!(read, 128);
    assert_eq!(&trailer[..3], b"TAG");
    assert_eq!(tokenizer.position(), 10);

    let mut beyond = [0u8; 16];
    assert_eq!(tokenizer.random_read(&mut beyond, 195).await?, 5);
    Ok(())
}

#[tokio::test]
async fn ignore_stops_at_end_of_file() -> Result<(), Box<dyn std::error::Error>> {
    let file = temp_file(b"12345")?;
    let mut tokenizer = from_file(file.path()).await?;

    assert_eq!(tokenizer.ignore(3).await?, 3);
    assert_eq!(tokenizer.ignore(10).await?, 2);
    assert_eq!(
        tokenizer.ignore_exact(1).await,
        Err(ReaderError::EndOfStream)
    );
    Ok(())
}
