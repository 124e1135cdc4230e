//! Tests for [`llm_client::ImageInput::from_path`].

use llm_client::{ImageInput, LlmConfig, OpenAILlmClient, EnvLlmConfig};
use tempfile::TempDir;

/// **Test:** MIME type follows the file extension and bytes are read verbatim.
#[tokio::test]
async fn test_from_path_reads_bytes_and_mime() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("photo.jpg");
    std::fs::write(&path, [0xFF, 0xD8, 0xFF]).unwrap();

    let image = ImageInput::from_path(&path).await.unwrap();
    assert_eq!(image.mime_type, "image/jpeg");
    assert_eq!(image.bytes, vec![0xFF, 0xD8, 0xFF]);
    assert!(image.to_data_url().starts_with("data:image/jpeg;base64,"));
}

#[tokio::test]
async fn test_from_path_rejects_non_images() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "hello").unwrap();
    assert!(ImageInput::from_path(&path).await.is_err());
}

#[tokio::test]
async fn test_from_path_missing_file() {
    let dir = TempDir::new().unwrap();
    assert!(ImageInput::from_path(dir.path().join("gone.png")).await.is_err());
}

#[test]
fn test_client_from_config_keeps_model() {
    let config = EnvLlmConfig {
        openai_api_key: "sk-test".to_string(),
        openai_base_url: "http://localhost:11434/v1".to_string(),
        llm_model: "llava".to_string(),
    };
    let client = OpenAILlmClient::from_config(&config);
    assert_eq!(client.model(), config.model());
}
