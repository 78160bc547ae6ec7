//! Test binary for verifying Gemini API access with the chatbot's settings
//! This is a utility binary, not part of the main application

use sus_virtual_backend::chat::prompt::build_prompt;
use sus_virtual_backend::config::Config;
use sus_virtual_backend::gemini::{GeminiClient, GenerativeModel};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Testing Gemini API access from Rust...\n");

    // Test 1: Check if API key is available
    println!("1. Checking for GEMINI_API_KEY environment variable...");
    let config = Config::from_env();
    if config.gemini.api_key.is_empty() {
        eprintln!("   ✗ GEMINI_API_KEY not found in environment");
        eprintln!("   Make sure to export it: export GEMINI_API_KEY=\"your-key\"");
        return Err("GEMINI_API_KEY not set".into());
    }
    println!(
        "   ✓ GEMINI_API_KEY is set (length: {} chars)",
        config.gemini.api_key.len()
    );

    // Test 2: Show the effective settings
    println!("\n2. Effective settings...");
    println!("   Model:    {}", config.gemini.model);
    println!("   Base URL: {}", config.gemini.base_url);
    println!("   Timeout:  {}s", config.gemini.timeout_secs);

    // Test 3: Send a question through the full prompt
    println!("\n3. Sending test question...");
    let question = "Quais documentos preciso para atendimento?";
    println!("   Question: '{}'", question);

    let client = GeminiClient::new(&config.gemini)?;
    match client.generate(&build_prompt(question)).await {
        Ok(text) => {
            println!("   ✓ Response received ({} chars):", text.chars().count());
            println!("   {}", text.trim());
        }
        Err(e) => {
            eprintln!("   ✗ Request failed: {}", e);
            eprintln!("\n   Troubleshooting:");
            eprintln!("   - Make sure GEMINI_API_KEY is valid: echo $GEMINI_API_KEY");
            eprintln!("   - Check GEMINI_MODEL is available for your key");
            return Err(e.into());
        }
    }

    println!("\n✓ All tests completed!");
    Ok(())
}
