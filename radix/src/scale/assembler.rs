//! Builds a [`ColorScaleRecord`] from the light, dark and overlay source files.

use std::future::Future;
use std::sync::Arc;

use super::{canonical_scale, variant_names, BlockExtractor, ColorScaleRecord, ExportParser};
use super::{ScaleName, VariantMap};
use crate::error::{FetchError, FetchResult};

/// Assembles scale records with a pluggable [`BlockExtractor`].
#[derive(Clone)]
pub struct ScaleAssembler {
    parser: Arc<dyn BlockExtractor>,
}

impl Default for ScaleAssembler {
    fn default() -> Self {
        Self::new(Arc::new(ExportParser))
    }
}

impl ScaleAssembler {
    pub fn new(parser: Arc<dyn BlockExtractor>) -> Self {
        Self { parser }
    }

    pub fn parser(&self) -> &Arc<dyn BlockExtractor> {
        &self.parser
    }

    /// Resolves `requested` to a scale and collects its variants.
    ///
    /// `fetch_file` receives a file stem (`light`, `dark`, `blackA`, ...) and returns that
    /// file's source. Overlay scales read only their own file; other scales read `light` then
    /// `dark`. A file that fails to fetch contributes nothing and does not stop the other.
    /// When no variant carries tokens the result is [`FetchError::NotFound`].
    pub async fn assemble<F, Fut>(
        &self,
        requested: &str,
        mut fetch_file: F,
    ) -> FetchResult<ColorScaleRecord>
    where
        F: FnMut(String) -> Fut,
        Fut: Future<Output = FetchResult<String>>,
    {
        let scale = canonical_scale(requested)?;
        let mut record = ColorScaleRecord::new(scale.scale());

        match &scale {
            ScaleName::Overlay(name) => {
                let names = [name.to_string()];
                record.overlay = self.read_side(&mut fetch_file, name, &names).await;
            }
            ScaleName::Base(base) | ScaleName::Variant { base, .. } => {
                record.light = self
                    .read_side(&mut fetch_file, "light", &variant_names(base, false))
                    .await;
                record.dark = self
                    .read_side(&mut fetch_file, "dark", &variant_names(base, true))
                    .await;
            }
        }

        if record.is_empty() {
            return Err(FetchError::NotFound(format!(
                "color scale \"{}\"",
                requested.trim()
            )));
        }
        Ok(record)
    }

    async fn read_side<F, Fut>(
        &self,
        fetch_file: &mut F,
        file: &str,
        names: &[String],
    ) -> Option<VariantMap>
    where
        F: FnMut(String) -> Fut,
        Fut: Future<Output = FetchResult<String>>,
    {
        let source = match fetch_file(file.to_string()).await {
            Ok(source) => source,
            Err(e) => {
                tracing::warn!(file, error = %e, "color source unavailable");
                return None;
            }
        };
        self.collect(&source, names)
    }

    /// First non-empty block for each wanted name, in `names` order.
    fn collect(&self, source: &str, names: &[String]) -> Option<VariantMap> {
        let blocks = self.parser.extract_blocks(source);
        let mut found = VariantMap::new();
        for name in names {
            if let Some(block) = blocks.iter().find(|b| &b.name == name && !b.is_empty()) {
                found.insert(name.clone(), block.clone());
            }
        }
        (!found.is_empty()).then_some(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::TokenBlock;
    use std::sync::Mutex;

    const LIGHT: &str = r##"
export const blue = { blue1: "#fbfdff", blue2: "#f4faff" };
export const blueA = { blueA1: "#0080ff04" };
export const blueP3 = { blue1: "color(display-p3 0.98 0.99 1)" };
export const red = { red1: "#fffcfc" };
"##;

    const DARK: &str = r##"
export const blueDark = { blue1: "#0d1520" };
export const redDark = { red1: "#191111" };
"##;

    const BLACK_A: &str = r#"export const blackA = { blackA1: "rgba(0, 0, 0, 0.05)" };"#;

    fn files<'a>(
        light: Option<&'static str>,
        dark: Option<&'static str>,
        log: &'a Mutex<Vec<String>>,
    ) -> impl FnMut(String) -> std::future::Ready<FetchResult<String>> + 'a {
        move |stem: String| {
            log.lock().unwrap().push(stem.clone());
            let body = match stem.as_str() {
                "light" => light,
                "dark" => dark,
                "blackA" => Some(BLACK_A),
                _ => None,
            };
            std::future::ready(
                body.map(str::to_string)
                    .ok_or(FetchError::NotFound(stem)),
            )
        }
    }

    #[tokio::test]
    async fn base_scale_reads_light_and_dark() {
        let log = Mutex::new(Vec::new());
        let record = ScaleAssembler::default()
            .assemble("blue", files(Some(LIGHT), Some(DARK), &log))
            .await
            .unwrap();

        assert_eq!(record.scale_name, "blue");
        let light = record.light.unwrap();
        assert_eq!(
            light.keys().collect::<Vec<_>>(),
            vec!["blue", "blueA", "blueP3"]
        );
        let dark = record.dark.unwrap();
        assert_eq!(dark.keys().collect::<Vec<_>>(), vec!["blueDark"]);
        assert!(record.overlay.is_none());
        assert_eq!(*log.lock().unwrap(), vec!["light", "dark"]);
    }

    #[tokio::test]
    async fn overlay_scale_reads_only_its_file() {
        let log = Mutex::new(Vec::new());
        let record = ScaleAssembler::default()
            .assemble("BlackA", files(Some(LIGHT), Some(DARK), &log))
            .await
            .unwrap();

        assert_eq!(record.scale_name, "blackA");
        assert!(record.light.is_none());
        assert!(record.dark.is_none());
        assert_eq!(record.overlay.unwrap()["blackA"].tokens.len(), 1);
        assert_eq!(*log.lock().unwrap(), vec!["blackA"]);
    }

    #[tokio::test]
    async fn failed_dark_file_keeps_light_variants() {
        let log = Mutex::new(Vec::new());
        let record = ScaleAssembler::default()
            .assemble("red", files(Some(LIGHT), None, &log))
            .await
            .unwrap();
        assert_eq!(record.light.unwrap().len(), 1);
        assert!(record.dark.is_none());
        assert_eq!(log.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn unknown_scale_is_not_found() {
        let log = Mutex::new(Vec::new());
        let err = ScaleAssembler::default()
            .assemble("ultraviolet", files(Some(LIGHT), Some(DARK), &log))
            .await
            .unwrap_err();
        assert_eq!(err, FetchError::NotFound("color scale \"ultraviolet\"".into()));
    }

    struct Fixed(Vec<TokenBlock>);

    impl BlockExtractor for Fixed {
        fn extract_blocks(&self, _source: &str) -> Vec<TokenBlock> {
            self.0.clone()
        }
    }

    #[tokio::test]
    async fn first_non_empty_duplicate_wins() {
        let parser = Fixed(vec![
            TokenBlock::new("gray"),
            TokenBlock::new("gray").with_token("gray1", "first"),
            TokenBlock::new("gray").with_token("gray1", "second"),
        ]);
        let log = Mutex::new(Vec::new());
        let record = ScaleAssembler::new(Arc::new(parser))
            .assemble("gray", files(Some(""), Some(""), &log))
            .await
            .unwrap();
        let light = record.light.unwrap();
        assert_eq!(light["gray"].tokens["gray1"], "first");
    }
}
