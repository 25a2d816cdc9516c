#[cfg(test)]
mod tests {
    use crate::config::*;

    #[test]
    fn test_default_limit_config() {
        let config = LimitConfig::default();
        assert_eq!(config.min_message_interval_secs, 2);
        assert_eq!(config.reply_preview_chars, 100);
    }

    #[test]
    fn test_parse_minimal_config() {
        let toml_str = r#"
            [telegram]
            bot_token = "123:abc"

            [llm]
            api_key = "sk-test"
        "#;
        let config: Config = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.telegram.bot_token, "123:abc");
        assert_eq!(config.llm.api_key, "sk-test");
        assert_eq!(config.llm.model, "deepseek-chat");
        assert_eq!(config.llm.max_tokens, 1024);
        assert_eq!(config.llm.temperature, 0.3);
        assert_eq!(config.limits.min_message_interval_secs, 2);
    }

    #[test]
    fn test_parse_config_with_overrides() {
        let toml_str = r#"
            [telegram]
            bot_token = "123:abc"

            [llm]
            api_key = "sk-test"
            model = "deepseek-reasoner"
            max_tokens = 2048

            [limits]
            min_message_interval_secs = 5
            reply_preview_chars = 60
        "#;
        let config: Config = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.llm.model, "deepseek-reasoner");
        assert_eq!(config.llm.max_tokens, 2048);
        assert_eq!(config.limits.min_message_interval_secs, 5);
        assert_eq!(config.limits.reply_preview_chars, 60);
    }

    #[test]
    fn test_missing_bot_token_fails_to_parse() {
        let toml_str = r#"
            [llm]
            api_key = "sk-test"
        "#;
        assert!(toml::from_str::<Config>(toml_str).is_err());
    }

    #[test]
    fn test_from_secrets_accepts_cli_provided_values() {
        let config = Config::from_secrets(
            Some("123:abc".to_string()),
            Some("sk-test".to_string()),
        )
        .expect("config");
        assert_eq!(config.telegram.bot_token, "123:abc");
        assert_eq!(config.llm.api_key, "sk-test");
        assert_eq!(config.limits.min_message_interval_secs, 2);
    }

    #[test]
    fn test_from_secrets_missing_bot_token_is_fatal() {
        let err = Config::from_secrets(None, Some("sk-test".to_string()))
            .expect_err("should fail");
        assert!(err.to_string().contains("TELEGRAM_BOT_TOKEN"));
    }

    #[test]
    fn test_from_secrets_missing_api_key_is_fatal() {
        let err = Config::from_secrets(Some("123:abc".to_string()), None)
            .expect_err("should fail");
        assert!(err.to_string().contains("DEEPSEEK_API_KEY"));
    }

    #[test]
    fn test_to_deepseek_config_carries_llm_settings() {
        let llm = LlmConfig {
            api_key: "sk-test".to_string(),
            model: "deepseek-chat".to_string(),
            max_tokens: 512,
            temperature: 0.7,
        };
        let ds = llm.to_deepseek_config();
        assert_eq!(ds.api_key, "sk-test");
        assert_eq!(ds.max_tokens, 512);
        assert_eq!(ds.temperature, 0.7);
        assert_eq!(ds.base_url, "https://api.deepseek.com/v1");
    }
}
