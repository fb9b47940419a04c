use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::llm::ProgressReporter;

/// 进度指示器（旋转动画）
///
/// 后备模型切换时通过 [`ProgressReporter`] 追加后缀，例如
/// `Comparing 3 editions... (trying groq/llama-3.3-70b-versatile)`。
pub struct Spinner {
    pb: ProgressBar,
    base_message: String,
}

impl Spinner {
    pub fn new(message: &str, colored: bool) -> Self {
        let template = if colored {
            "{spinner:.green} {msg}"
        } else {
            "{spinner} {msg}"
        };
        let style = ProgressStyle::default_spinner()
            .template(template)
            .unwrap_or_else(|_| ProgressStyle::default_spinner());

        let pb = ProgressBar::new_spinner();
        pb.set_style(style);
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(80));
        Self {
            pb,
            base_message: message.to_string(),
        }
    }

    /// 完成并清除
    pub fn finish_and_clear(&self) {
        self.pb.finish_and_clear();
    }

    #[cfg(test)]
    fn current_message(&self) -> String {
        self.pb.message()
    }
}

impl ProgressReporter for Spinner {
    fn append_suffix(&self, suffix: &str) {
        self.pb.set_message(format!("{} {}", self.base_message, suffix));
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.pb.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_replaces_previous_suffix() {
        let spinner = Spinner::new("Comparing", false);
        spinner.append_suffix("(trying a)");
        spinner.append_suffix("(trying b)");
        assert_eq!(spinner.current_message(), "Comparing (trying b)");
        spinner.finish_and_clear();
    }
}
