//! 輸入與輸出文件

use std::fs;
use std::path::Path;

use linecap_calc::PlanningReport;
use linecap_core::PlanningInput;

/// 讀取並驗證輸入文件
pub fn load_input(path: &Path) -> linecap_core::Result<PlanningInput> {
    let json = fs::read_to_string(path)?;
    let input = PlanningInput::from_json_str(&json)?;

    tracing::info!(
        "已讀取 {}：產線 {} 條，機種 {} 個，需求 {} 筆",
        path.display(),
        input.lines.len(),
        input.models.len(),
        input.volumes.len()
    );

    Ok(input)
}

/// 寫出報表（先完整序列化，再寫入檔案）
pub fn write_report(report: &PlanningReport, path: &Path) -> linecap_core::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json)?;

    tracing::info!("結果已寫入 {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use linecap_core::CapaError;
    use std::io::Write;

    #[test]
    fn test_load_input_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_input(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, CapaError::Io(_)));
    }

    #[test]
    fn test_load_input_rejects_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = load_input(file.path()).unwrap_err();
        assert!(matches!(err, CapaError::Json(_)));
    }

    #[test]
    fn test_load_input_requires_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"models": [], "volumes": [], "compatibilities": [], "selectedYears": []}}"#
        )
        .unwrap();

        assert!(load_input(file.path()).is_err());
    }
}
