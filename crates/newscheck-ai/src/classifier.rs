//! ONNX Runtime gateway for the pre-trained fake-news classification artifact.
//!
//! The model directory must contain `model.onnx` and `tokenizer.json`; an
//! optional `labels.json` overrides the raw-index → verdict convention.
//! Loading is expensive (session construction plus artifact
//! deserialisation) and happens once per process; inference is a read-only
//! transform over the loaded artifact.

use std::path::Path;
use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, FixedSizeListArray, FixedSizeListBuilder, Float32Array, Float32Builder,
    Float64Array, LargeStringArray, StringArray,
};
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;
use ort::session::Session;
use ort::value::Tensor;
use tokenizers::Tokenizer;
use tracing::info;

use newscheck_core::schema;
use newscheck_core::{LabelMap, Prediction, Verdict};

use crate::error::{GatewayError, Result};

/// Tokenizer truncation length, the model's maximum sequence length.
const MAX_TOKENS: usize = 512;

/// Binary fake/real news classifier backed by ONNX Runtime.
///
/// Holds the loaded artifact for the lifetime of the process; there is no
/// reload path in normal operation.
#[derive(Debug)]
pub struct NewsClassifier {
    session: Session,
    tokenizer: Tokenizer,
    labels: LabelMap,
}

impl NewsClassifier {
    /// Load the classification artifact from a directory.
    ///
    /// Fails fast if the directory is missing either `model.onnx` or
    /// `tokenizer.json`; a retry would not help without operator
    /// intervention, so none is attempted.
    pub fn load(model_dir: &Path) -> Result<Self> {
        let model_path = model_dir.join("model.onnx");
        let tokenizer_path = model_dir.join("tokenizer.json");

        if !model_path.exists() {
            return Err(GatewayError::ArtifactNotFound(model_path));
        }
        if !tokenizer_path.exists() {
            return Err(GatewayError::ArtifactNotFound(tokenizer_path));
        }

        let session = Session::builder()
            .and_then(|mut builder| builder.commit_from_file(&model_path))
            .map_err(|e| GatewayError::ArtifactLoad(e.to_string()))?;

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| GatewayError::Tokenizer(e.to_string()))?;
        tokenizer
            .with_truncation(Some(tokenizers::TruncationParams {
                max_length: MAX_TOKENS,
                ..Default::default()
            }))
            .map_err(|e| GatewayError::Tokenizer(e.to_string()))?;
        tokenizer.with_padding(Some(tokenizers::PaddingParams::default()));

        let labels = load_label_map(model_dir)?;

        info!(model = %model_path.display(), "loaded classification artifact");
        Ok(Self {
            session,
            tokenizer,
            labels,
        })
    }

    /// The raw-index → verdict convention in effect for this artifact.
    pub fn label_map(&self) -> &LabelMap {
        &self.labels
    }

    /// Classify one cleaned document.
    ///
    /// Wraps the document in a single-row request table, runs
    /// [`transform`](Self::transform), and reads exactly the first row of
    /// the response. A failure here is per-request; the gateway remains
    /// servable afterwards.
    pub fn classify(&mut self, text: &str) -> Result<Prediction> {
        if text.trim().is_empty() {
            return Err(GatewayError::EmptyDocument);
        }
        let request = schema::request_batch(text)?;
        let response = self.transform(&request)?;
        self.read_first_row(&response)
    }

    /// Run the pipeline over a request table.
    ///
    /// The input must carry a `text` column (Utf8 or LargeUtf8). The output
    /// repeats the input columns and appends `prediction` (raw class index
    /// as Float64) and `probability` (FixedSizeList of the 2-class
    /// distribution).
    pub fn transform(&mut self, batch: &RecordBatch) -> Result<RecordBatch> {
        let texts = extract_texts(batch)?;

        let mut raw_predictions = Vec::with_capacity(texts.len());
        let mut distributions = Vec::with_capacity(texts.len());
        for text in &texts {
            let probs = self.infer(text)?;
            let raw = if probs[0] >= probs[1] { 0.0 } else { 1.0 };
            raw_predictions.push(raw);
            distributions.push(probs);
        }

        build_response(batch, &raw_predictions, &distributions)
    }

    /// Tokenize one document and run the ONNX forward pass, returning the
    /// softmax distribution over the two classes.
    fn infer(&mut self, text: &str) -> Result<[f32; 2]> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| GatewayError::Tokenizer(e.to_string()))?;

        let seq_len = encoding.get_ids().len();
        let input_ids: Vec<i64> = encoding.get_ids().iter().map(|&v| v as i64).collect();
        let attention_mask: Vec<i64> = encoding
            .get_attention_mask()
            .iter()
            .map(|&v| v as i64)
            .collect();
        let token_type_ids: Vec<i64> =
            encoding.get_type_ids().iter().map(|&v| v as i64).collect();

        let shape = [1i64, seq_len as i64];
        let ids_tensor = Tensor::from_array((shape, input_ids.into_boxed_slice()))
            .map_err(|e| GatewayError::Inference(e.to_string()))?;
        let mask_tensor = Tensor::from_array((shape, attention_mask.into_boxed_slice()))
            .map_err(|e| GatewayError::Inference(e.to_string()))?;
        let type_tensor = Tensor::from_array((shape, token_type_ids.into_boxed_slice()))
            .map_err(|e| GatewayError::Inference(e.to_string()))?;

        let outputs = self
            .session
            .run(ort::inputs![
                "input_ids" => ids_tensor,
                "attention_mask" => mask_tensor,
                "token_type_ids" => type_tensor,
            ])
            .map_err(|e| GatewayError::Inference(e.to_string()))?;

        // Logits: [1, 2] from the sequence-classification head.
        let (output_shape, logits) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| GatewayError::Inference(e.to_string()))?;
        let dims: &[i64] = output_shape;
        if dims.len() != 2 || dims[1] != i64::from(schema::NUM_CLASSES) {
            return Err(GatewayError::Inference(format!(
                "unexpected logits shape: {dims:?}, expected [1, {}]",
                schema::NUM_CLASSES
            )));
        }

        Ok(softmax2(logits[0], logits[1]))
    }

    /// Interpret the first response row as a [`Prediction`].
    fn read_first_row(&self, batch: &RecordBatch) -> Result<Prediction> {
        if batch.num_rows() == 0 {
            return Err(GatewayError::Inference("empty response table".into()));
        }

        let pred_col = batch
            .column_by_name(schema::PREDICTION_COL)
            .ok_or(GatewayError::MissingColumn(schema::PREDICTION_COL))?;
        let raw = pred_col
            .as_any()
            .downcast_ref::<Float64Array>()
            .ok_or_else(|| GatewayError::Inference("prediction column is not Float64".into()))?
            .value(0) as usize;

        let prob_col = batch
            .column_by_name(schema::PROBABILITY_COL)
            .ok_or(GatewayError::MissingColumn(schema::PROBABILITY_COL))?;
        let list = prob_col
            .as_any()
            .downcast_ref::<FixedSizeListArray>()
            .ok_or_else(|| {
                GatewayError::Inference("probability column is not FixedSizeList".into())
            })?;
        let row = list.value(0);
        let probs = row
            .as_any()
            .downcast_ref::<Float32Array>()
            .ok_or_else(|| GatewayError::Inference("probability values are not Float32".into()))?;

        let verdict = self.labels.verdict(raw).ok_or_else(|| {
            GatewayError::Inference(format!("prediction index {raw} outside label map"))
        })?;

        Ok(Prediction {
            verdict,
            p_fake: probs.value(self.labels.index_of(Verdict::Fake)),
            p_real: probs.value(self.labels.index_of(Verdict::Real)),
        })
    }
}

/// Numerically stable 2-class softmax.
fn softmax2(a: f32, b: f32) -> [f32; 2] {
    let max = a.max(b);
    let ea = (a - max).exp();
    let eb = (b - max).exp();
    let sum = ea + eb;
    [ea / sum, eb / sum]
}

/// Extract text strings from the request's `text` column.
///
/// Handles both `Utf8` (StringArray) and `LargeUtf8` (LargeStringArray).
fn extract_texts(batch: &RecordBatch) -> Result<Vec<&str>> {
    let col = batch
        .column_by_name(schema::TEXT_COL)
        .ok_or(GatewayError::MissingColumn(schema::TEXT_COL))?;

    if let Some(arr) = col.as_any().downcast_ref::<StringArray>() {
        Ok((0..arr.len()).map(|i| arr.value(i)).collect())
    } else if let Some(arr) = col.as_any().downcast_ref::<LargeStringArray>() {
        Ok((0..arr.len()).map(|i| arr.value(i)).collect())
    } else {
        Err(GatewayError::Inference(format!(
            "unexpected text column type: {:?}",
            col.data_type()
        )))
    }
}

/// Append `prediction` and `probability` columns to the request batch.
fn build_response(
    batch: &RecordBatch,
    predictions: &[f64],
    distributions: &[[f32; 2]],
) -> Result<RecordBatch> {
    let mut fields: Vec<Field> = batch
        .schema()
        .fields()
        .iter()
        .map(|f| f.as_ref().clone())
        .collect();
    fields.extend(schema::response_fields());

    // Input columns are cheap Arc clones.
    let mut columns: Vec<ArrayRef> = batch.columns().to_vec();
    columns.push(Arc::new(Float64Array::from(predictions.to_vec())));

    let mut prob_builder = FixedSizeListBuilder::new(Float32Builder::new(), schema::NUM_CLASSES);
    for dist in distributions {
        let values = prob_builder.values();
        for &p in dist {
            values.append_value(p);
        }
        prob_builder.append(true);
    }
    columns.push(Arc::new(prob_builder.finish()));

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
}

/// Read the optional `labels.json` override beside the model.
fn load_label_map(model_dir: &Path) -> Result<LabelMap> {
    let path = model_dir.join("labels.json");
    if !path.exists() {
        return Ok(LabelMap::default());
    }
    let raw = std::fs::read_to_string(&path)
        .map_err(|e| GatewayError::ArtifactLoad(format!("read {}: {e}", path.display())))?;
    Ok(LabelMap::from_json_str(&raw)?)
}
