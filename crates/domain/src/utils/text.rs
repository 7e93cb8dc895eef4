//! Header and filename text normalization

/// Normalize a spreadsheet header for matching: trim, strip accents, fold
/// case, treat `_` as a space and collapse runs of whitespace.
///
/// `" Fecha_Recepción "` and `"FECHA RECEPCION"` both become
/// `"fecha recepcion"`.
pub fn normalize_header(raw: &str) -> String {
    let folded: String = raw
        .chars()
        .map(|c| if c == '_' { ' ' } else { strip_accent(c) })
        .flat_map(char::to_lowercase)
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn strip_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'ä' | 'â' => 'a',
        'Á' | 'À' | 'Ä' | 'Â' => 'A',
        'é' | 'è' | 'ë' | 'ê' => 'e',
        'É' | 'È' | 'Ë' | 'Ê' => 'E',
        'í' | 'ì' | 'ï' | 'î' => 'i',
        'Í' | 'Ì' | 'Ï' | 'Î' => 'I',
        'ó' | 'ò' | 'ö' | 'ô' => 'o',
        'Ó' | 'Ò' | 'Ö' | 'Ô' => 'O',
        'ú' | 'ù' | 'ü' | 'û' => 'u',
        'Ú' | 'Ù' | 'Ü' | 'Û' => 'U',
        'ñ' => 'n',
        'Ñ' => 'N',
        other => other,
    }
}

/// Make a filter value safe to embed in a filename: path separators become
/// `-` and surrounding whitespace is dropped.
pub fn filename_part(value: &str) -> String {
    value.trim().replace(['/', '\\'], "-")
}
