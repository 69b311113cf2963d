use serde::Deserialize;

/// Page geometry and content policy for generated documents. Lengths are in
/// PDF points.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DocumentSettings {
    pub page_width: f32,
    pub page_height: f32,
    /// Margin on all four sides of the deployment report.
    pub deployment_margin: f32,
    /// Margin on all four sides of the statistics report.
    pub statistics_margin: f32,
    /// Maximum number of rows in the detail table.
    pub detail_row_limit: usize,
    pub project_max_chars: usize,
    pub component_max_chars: usize,
    pub developer_max_chars: usize,
    pub chart_width: f32,
    pub chart_height: f32,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self {
            page_width: 612.0,
            page_height: 792.0,
            deployment_margin: 30.0,
            statistics_margin: 72.0,
            detail_row_limit: 50,
            project_max_chars: 20,
            component_max_chars: 20,
            developer_max_chars: 15,
            chart_width: 432.0,
            chart_height: 288.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_us_letter() {
        let settings = DocumentSettings::default();
        assert_eq!((settings.page_width, settings.page_height), (612.0, 792.0));
        assert_eq!(settings.detail_row_limit, 50);
    }

    #[test]
    fn partial_override() {
        let settings: DocumentSettings =
            serde_json::from_str(r#"{"detail-row-limit": 10, "statistics-margin": 36}"#).unwrap();
        assert_eq!(settings.detail_row_limit, 10);
        assert_eq!(settings.statistics_margin, 36.0);
        assert_eq!(settings.deployment_margin, 30.0);
    }
}
