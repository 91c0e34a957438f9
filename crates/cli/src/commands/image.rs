//! `motormind image` — analyze a car photo.
//!
//! One-shot analysis: reads the file, runs it through the vision backend,
//! prints the extracted details. Inside `motormind chat`, use `/image
//! <path>` instead so the details also become conversation context.

use motormind_core::prompts::VISION_PROMPT;
use motormind_core::provider::Provider;

const ALLOWED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

pub async fn run(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = motormind_config::AppConfig::load()
        .map_err(|e| format!("Failed to load config: {e}"))?;
    super::require_api_key(&config)?;

    let provider = motormind_providers::create_provider(&config.vision)
        .map_err(|e| format!("Failed to configure vision provider: {e}"))?;

    eprint!("  Analyzing...");
    let details = analyze(path, provider.as_ref()).await?;
    eprint!("\r             \r");

    println!("{details}");
    Ok(())
}

/// Validate the file type, read the bytes, and run vision extraction.
pub async fn analyze(
    path: &str,
    provider: &dyn Provider,
) -> Result<String, Box<dyn std::error::Error>> {
    let extension = std::path::Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(format!(
            "Unsupported file type '.{extension}' — accepted: .jpg, .jpeg, .png"
        )
        .into());
    }

    let bytes = std::fs::read(path).map_err(|e| format!("Failed to read {path}: {e}"))?;
    let details = provider.describe_image(&bytes, VISION_PROMPT).await?;
    Ok(details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use motormind_core::error::ProviderError;
    use motormind_core::message::Message;
    use motormind_core::provider::GenerationOptions;

    struct VisionStub;

    #[async_trait]
    impl Provider for VisionStub {
        fn name(&self) -> &str {
            "stub"
        }
        async fn generate(
            &self,
            _prompt: &str,
            _history: &[Message],
            _options: &GenerationOptions,
        ) -> Result<String, ProviderError> {
            Ok(String::new())
        }
        async fn describe_image(
            &self,
            _image: &[u8],
            _prompt: &str,
        ) -> Result<String, ProviderError> {
            Ok("A blue 2020 BMW X5.".into())
        }
    }

    #[tokio::test]
    async fn rejects_unsupported_extension() {
        let err = analyze("photo.gif", &VisionStub).await.unwrap_err();
        assert!(err.to_string().contains(".gif"));
    }

    #[tokio::test]
    async fn rejects_extensionless_path() {
        let err = analyze("photo", &VisionStub).await.unwrap_err();
        assert!(err.to_string().contains("Unsupported file type"));
    }

    #[tokio::test]
    async fn analyzes_valid_image() {
        let dir = std::env::temp_dir();
        let path = dir.join("motormind-test-car.jpg");
        std::fs::write(&path, b"not a real jpeg, stub never decodes it").unwrap();

        let details = analyze(path.to_str().unwrap(), &VisionStub).await.unwrap();
        assert_eq!(details, "A blue 2020 BMW X5.");

        std::fs::remove_file(&path).ok();
    }
}
