/*!
 * Tests for TMX reading and conversion
 */

use anyhow::Result;
use termaudit::errors::TmxError;
use termaudit::tmx_parser::TmxParser;
use termaudit::terminology::Translation;
use crate::common;

/// Test parsing of a well-formed document
#[test]
fn test_parseStr_withFigureDocument_shouldKeepDocumentOrder() -> Result<()> {
    let document = common::tmx_document("JA", "EN-US", &common::FIGURE_SEGMENTS);
    let translation = TmxParser::parse_str(&document)?;

    assert_eq!(translation.len(), 7);
    assert_eq!(translation.pairs(), common::FIGURE_SEGMENTS.to_vec());
    assert_eq!(translation.source_language.as_deref(), Some("JA"));
    assert_eq!(translation.target_language.as_deref(), Some("EN-US"));
    Ok(())
}

/// Test that the source variant is found by language even when listed second
#[test]
fn test_parseStr_withTargetListedFirst_shouldPickSourceByLanguage() -> Result<()> {
    let document = r#"<tmx version="1.4"><header srclang="ja-JP"/><body>
<tu><tuv xml:lang="en"><seg>Abstract</seg></tuv><tuv xml:lang="JA"><seg>要約書</seg></tuv></tu>
</body></tmx>"#;
    let translation = TmxParser::parse_str(document)?;

    assert_eq!(translation.pairs(), vec![("要約書", "Abstract")]);
    assert_eq!(translation.target_language.as_deref(), Some("en"));
    Ok(())
}

/// Test that an exact region match beats an earlier same-language variant
#[test]
fn test_parseStr_withRegionalVariants_shouldPreferExactSourceTag() -> Result<()> {
    let document = r#"<tmx version="1.4"><header srclang="en-US"/><body>
<tu><tuv xml:lang="en-GB"><seg>colour</seg></tuv><tuv xml:lang="EN-us"><seg>color</seg></tuv></tu>
</body></tmx>"#;
    let translation = TmxParser::parse_str(document)?;

    assert_eq!(translation.pairs(), vec![("color", "colour")]);
    assert_eq!(translation.target_language.as_deref(), Some("en-GB"));
    Ok(())
}

/// Test that a self-closing unit does not swallow the unit after it
#[test]
fn test_parseStr_withSelfClosingUnit_shouldKeepNeighboursSeparate() -> Result<()> {
    let document = r#"<tmx version="1.4"><header srclang="JA"/><body>
<tu/>
<tu><tuv xml:lang="JA"><seg>要約書</seg></tuv><tuv xml:lang="EN"><seg>Abstract</seg></tuv></tu>
<tu tuid="3" /><tu><tuv xml:lang="JA"><seg>技術分野</seg></tuv><tuv xml:lang="EN"><seg>Technical Field</seg></tuv></tu>
</body></tmx>"#;
    let translation = TmxParser::parse_str(document)?;

    assert_eq!(
        translation.pairs(),
        vec![("要約書", "Abstract"), ("技術分野", "Technical Field")]
    );
    Ok(())
}

/// Test that the first variant is the source without a usable srclang
#[test]
fn test_parseStr_withAllSrclang_shouldUseFirstVariant() -> Result<()> {
    let document = r#"<tmx version="1.4"><header srclang="*all*"/><body>
<tu><tuv lang="EN"><seg>Abstract</seg></tuv><tuv lang="JA"><seg>要約書</seg></tuv></tu>
</body></tmx>"#;
    let translation = TmxParser::parse_str(document)?;

    assert_eq!(translation.source_language, None);
    assert_eq!(translation.pairs(), vec![("Abstract", "要約書")]);
    Ok(())
}

/// Test inline markup removal and entity decoding
#[test]
fn test_parseStr_withInlineMarkup_shouldExtractPlainText() -> Result<()> {
    let document = r#"<tmx version="1.4"><header srclang="JA"/><body>
<tu>
  <tuv xml:lang="JA"><seg><bpt i="1">&lt;b&gt;</bpt>装置<ept i="1">&lt;/b&gt;</ept>&amp;回路</seg></tuv>
  <tuv xml:lang="EN-US"><seg><hi x="1">device</hi> &amp; <ph x="2">{1}</ph>circuit&#x2122;</seg></tuv>
</tu>
</body></tmx>"#;
    let translation = TmxParser::parse_str(document)?;

    assert_eq!(translation.pairs(), vec![("装置&回路", "device & circuit™")]);
    Ok(())
}

/// Test that units without a target give an empty target text
#[test]
fn test_parseStr_withMissingTarget_shouldGiveEmptyTarget() -> Result<()> {
    let document = r#"<tmx version="1.4"><header srclang="JA"/><body>
<tu><tuv xml:lang="JA"><seg>要約書</seg></tuv></tu>
<tu><tuv xml:lang="JA"><seg>実施例</seg></tuv><tuv xml:lang="EN"><seg>example</seg></tuv></tu>
</body></tmx>"#;
    let translation = TmxParser::parse_str(document)?;

    assert_eq!(translation.pairs(), vec![("要約書", ""), ("実施例", "example")]);
    assert!(!translation.segments[0].has_content());
    Ok(())
}

/// Test that an empty body is a valid empty translation
#[test]
fn test_parseStr_withEmptyBody_shouldBeEmpty() -> Result<()> {
    let translation = TmxParser::parse_str(r#"<tmx version="1.4"><header srclang="JA"/><body/></tmx>"#)?;
    assert!(translation.is_empty());
    Ok(())
}

/// Test structural errors
#[test]
fn test_parseStr_withMalformedDocument_shouldFail() {
    assert_eq!(TmxParser::parse_str("<xliff></xliff>").unwrap_err(), TmxError::MissingRoot);
    assert_eq!(
        TmxParser::parse_str(r#"<tmx version="1.4"><header/></tmx>"#).unwrap_err(),
        TmxError::MissingBody
    );
    let bad_entity = r#"<tmx><body><tu><tuv xml:lang="JA"><seg>&#xD800;</seg></tuv></tu></body></tmx>"#;
    assert!(matches!(TmxParser::parse_str(bad_entity), Err(TmxError::InvalidEntity(_))));
}

/// Test that commented-out units are ignored
#[test]
fn test_parseStr_withComments_shouldIgnoreCommentedUnits() -> Result<()> {
    let document = r#"<tmx version="1.4"><header srclang="JA"/><body>
<!-- <tu><tuv xml:lang="JA"><seg>古い</seg></tuv><tuv xml:lang="EN"><seg>old</seg></tuv></tu> -->
<tu><tuv xml:lang="JA"><seg>新しい</seg></tuv><tuv xml:lang="EN"><seg>new</seg></tuv></tu>
</body></tmx>"#;
    let translation = TmxParser::parse_str(document)?;

    assert_eq!(translation.pairs(), vec![("新しい", "new")]);
    Ok(())
}

/// Test reading from disk
#[test]
fn test_parseFile_withFigureFile_shouldParse() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_figure_tmx(temp_dir.path(), "figures.tmx")?;

    let translation = TmxParser::parse_file(&path)?;

    assert_eq!(translation.len(), 7);
    assert!(TmxParser::parse_file(temp_dir.path().join("missing.tmx")).is_err());
    Ok(())
}

/// Test the tab-delimited export
#[test]
fn test_toTabDelimited_withEmbeddedTabs_shouldFlattenToOneLinePerSegment() {
    let translation = Translation::from_pairs(vec![("要約書", "Abstract"), ("a\tb", "line\none")]);

    let output = TmxParser::to_tab_delimited(&translation);

    assert_eq!(output, "要約書\tAbstract\na b\tline one\n");
}
