//! Tab-separated ligand table output.

use std::path::Path;

use alignyx_common::LigandRecord;

/// Write the selected top ligands as a tab-delimited table with a header
/// row, one row per ligand, in pairing order.
pub fn write_ligand_table<P: AsRef<Path>>(path: P, ligands: &[LigandRecord]) -> anyhow::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(path.as_ref())?;

    writer.write_record(["structure_id", "chemical_id", "molecular_weight", "smiles"])?;
    for ligand in ligands {
        writer.write_record([
            ligand.structure_id.as_str(),
            ligand.chemical_id.as_str(),
            &ligand.molecular_weight.to_string(),
            ligand.smiles.as_deref().unwrap_or(""),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_ligand_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ligands.tsv");

        let mut erlotinib = LigandRecord::new("1M17", "AQ4", 393.9);
        erlotinib.smiles = Some("COc1cc2ncnc(Nc3cccc(C#C)c3)c2cc1OC".to_string());
        let gefitinib = LigandRecord::new("2ITY", "IRE", 446.9);

        write_ligand_table(&path, &[erlotinib, gefitinib]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "structure_id\tchemical_id\tmolecular_weight\tsmiles");
        assert!(lines[1].starts_with("1M17\tAQ4\t393.9\t"));
        assert_eq!(lines[2], "2ITY\tIRE\t446.9\t");
    }

    #[test]
    fn test_empty_table_still_has_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ligands.tsv");
        write_ligand_table(&path, &[]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "structure_id\tchemical_id\tmolecular_weight\tsmiles\n");
    }
}
