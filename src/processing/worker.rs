//! 转换工作线程
//!
//! 严格按输入顺序串行处理：每个文件产生一个完成事件，随后产生一个累计进度事件。
//! 单个文件失败不会中断整批；解码器缺失是整批致命错误，在处理任何文件之前返回。

use super::outcome::{Outcome, RunSummary};
use crate::audio::{DecodeStatus, Decoder};
use crate::error::{ConvertError, ConvertResult};
use crate::tools::constants::defaults;
use crate::tools::utils;
use crossbeam_channel::Receiver;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Instant;

/// 工作线程发出的事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerEvent {
    /// 第 `index` 个输入处理完成
    ItemDone { index: usize, outcome: Outcome },
    /// 累计完成百分比 [0, 100]
    Progress(u8),
}

/// 累计进度：`floor(completed * 100 / total)`
///
/// `total == 0` 时没有定义，返回 0；调用方应在此之前短路空列表。
#[inline]
pub fn progress_percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    (completed.min(total) * 100 / total) as u8
}

/// 一次运行的转换工作者
pub struct ConversionWorker {
    inputs: Vec<PathBuf>,
    decoder: Arc<dyn Decoder>,
    output_dir: PathBuf,
}

impl ConversionWorker {
    pub fn new(inputs: Vec<PathBuf>, decoder: Arc<dyn Decoder>, output_dir: PathBuf) -> Self {
        Self {
            inputs,
            decoder,
            output_dir,
        }
    }

    /// 在当前线程执行整批转换，事件通过 `emit` 交付
    pub fn run<F>(self, mut emit: F) -> ConvertResult<RunSummary>
    where
        F: FnMut(WorkerEvent),
    {
        let total = self.inputs.len();
        if total == 0 {
            return Ok(RunSummary::empty(self.output_dir));
        }

        let started = Instant::now();

        std::fs::create_dir_all(&self.output_dir)?;
        self.decoder.ensure_available()?;

        tracing::info!(
            total,
            decoder = self.decoder.name(),
            output_dir = %self.output_dir.display(),
            "开始转换 / conversion started"
        );

        let mut summary = RunSummary::empty(self.output_dir.clone());
        summary.total = total;

        for (index, source) in self.inputs.iter().enumerate() {
            let outcome = self.convert_one(source);

            match &outcome {
                Outcome::Converted(path) => {
                    summary.converted += 1;
                    tracing::debug!(index, output = %path.display(), "[OK]");
                }
                Outcome::Failed(message) => {
                    summary.failed += 1;
                    tracing::warn!(index, source = %source.display(), "[FAIL] {message}");
                }
            }

            emit(WorkerEvent::ItemDone { index, outcome });
            emit(WorkerEvent::Progress(progress_percent(index + 1, total)));
        }

        summary.elapsed = started.elapsed();
        tracing::info!(
            converted = summary.converted,
            failed = summary.failed,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "转换完成 / conversion finished"
        );

        Ok(summary)
    }

    /// 在独立线程上运行，返回事件接收端与线程句柄
    ///
    /// 事件通道断开即表示工作线程已结束。
    pub fn spawn(self) -> ConvertResult<WorkerHandle> {
        let (sender, receiver) = crossbeam_channel::unbounded();

        let join = std::thread::Builder::new()
            .name(defaults::WORKER_THREAD_NAME.to_string())
            .spawn(move || {
                self.run(|event| {
                    if sender.send(event).is_err() {
                        tracing::debug!("事件接收端已关闭 / event receiver dropped");
                    }
                })
            })?;

        Ok(WorkerHandle {
            events: receiver,
            join,
        })
    }

    /// 处理单个文件，所有本地错误都折叠成 `Outcome::Failed`
    fn convert_one(&self, source: &Path) -> Outcome {
        let destination = utils::derive_output_path(source, &self.output_dir);

        if let Err(e) = std::fs::metadata(source) {
            return Outcome::Failed(e.to_string());
        }

        match self.decoder.decode(source, &destination) {
            Ok(DecodeStatus::Success) => Outcome::Converted(destination),
            Ok(DecodeStatus::Failed { code, stderr }) => {
                tracing::debug!(?code, "decoder exited with failure");
                Outcome::Failed(stderr)
            }
            Err(e) => Outcome::Failed(e.to_string()),
        }
    }
}

/// 正在运行的工作线程
pub struct WorkerHandle {
    events: Receiver<WorkerEvent>,
    join: JoinHandle<ConvertResult<RunSummary>>,
}

impl WorkerHandle {
    /// 事件接收端
    #[inline]
    pub fn events(&self) -> &Receiver<WorkerEvent> {
        &self.events
    }

    /// 等待线程结束并取回运行结果
    pub fn join(self) -> ConvertResult<RunSummary> {
        self.join.join().map_err(|_| ConvertError::WorkerPanicked)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io;
    use std::sync::Mutex;

    /// 按文件名脚本化返回结果的解码器
    struct ScriptedDecoder {
        failures: HashMap<String, String>,
        spawn_errors: Vec<String>,
        available: bool,
        calls: Mutex<Vec<PathBuf>>,
    }

    impl ScriptedDecoder {
        fn new() -> Self {
            Self {
                failures: HashMap::new(),
                spawn_errors: Vec::new(),
                available: true,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing(mut self, name: &str, stderr: &str) -> Self {
            self.failures.insert(name.to_string(), stderr.to_string());
            self
        }

        fn unlaunchable(mut self, name: &str) -> Self {
            self.spawn_errors.push(name.to_string());
            self
        }
    }

    impl Decoder for ScriptedDecoder {
        fn name(&self) -> &str {
            "scripted"
        }

        fn ensure_available(&self) -> ConvertResult<()> {
            if self.available {
                Ok(())
            } else {
                Err(ConvertError::DecoderMissing(PathBuf::from("scripted")))
            }
        }

        fn decode(&self, input: &Path, _output: &Path) -> io::Result<DecodeStatus> {
            self.calls.lock().unwrap().push(input.to_path_buf());
            let name = utils::extract_filename_lossy(input);
            if self.spawn_errors.contains(&name) {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "cannot launch decoder",
                ));
            }
            Ok(match self.failures.get(&name) {
                Some(stderr) => DecodeStatus::Failed {
                    code: Some(1),
                    stderr: stderr.clone(),
                },
                None => DecodeStatus::Success,
            })
        }
    }

    fn touch_inputs(dir: &Path, names: &[&str]) -> Vec<PathBuf> {
        names
            .iter()
            .map(|name| {
                let path = dir.join(name);
                std::fs::write(&path, b"RIFF").unwrap();
                path
            })
            .collect()
    }

    fn collect(worker: ConversionWorker) -> (ConvertResult<RunSummary>, Vec<WorkerEvent>) {
        let mut events = Vec::new();
        let result = worker.run(|e| events.push(e));
        (result, events)
    }

    #[test]
    fn test_progress_percent_floor() {
        assert_eq!(progress_percent(1, 3), 33);
        assert_eq!(progress_percent(2, 3), 66);
        assert_eq!(progress_percent(3, 3), 100);
        assert_eq!(progress_percent(1, 2), 50);
        assert_eq!(progress_percent(0, 0), 0);
    }

    #[test]
    fn test_mixed_batch_event_sequence() {
        let tmp = tempfile::tempdir().unwrap();
        let inputs = touch_inputs(tmp.path(), &["a.wem", "b.wem"]);
        let out_dir = tmp.path().join("output");
        let decoder = Arc::new(ScriptedDecoder::new().failing("b.wem", "bad header"));

        let worker = ConversionWorker::new(inputs, decoder, out_dir.clone());
        let (result, events) = collect(worker);

        assert_eq!(
            events,
            vec![
                WorkerEvent::ItemDone {
                    index: 0,
                    outcome: Outcome::Converted(out_dir.join("a.wav")),
                },
                WorkerEvent::Progress(50),
                WorkerEvent::ItemDone {
                    index: 1,
                    outcome: Outcome::Failed("bad header".to_string()),
                },
                WorkerEvent::Progress(100),
            ]
        );

        let summary = result.unwrap();
        assert_eq!(summary.total, 2);
        assert_eq!(summary.converted, 1);
        assert_eq!(summary.failed, 1);
        assert!(out_dir.is_dir(), "输出目录应在处理前创建");
    }

    #[test]
    fn test_event_counts_and_monotonic_progress() {
        let tmp = tempfile::tempdir().unwrap();
        let names: Vec<String> = (0..7).map(|i| format!("t{i}.wem")).collect();
        let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let inputs = touch_inputs(tmp.path(), &name_refs);
        let decoder = Arc::new(ScriptedDecoder::new().failing("t3.wem", "x"));

        let worker = ConversionWorker::new(inputs, decoder, tmp.path().join("output"));
        let (_, events) = collect(worker);

        let done: Vec<usize> = events
            .iter()
            .filter_map(|e| match e {
                WorkerEvent::ItemDone { index, .. } => Some(*index),
                _ => None,
            })
            .collect();
        let progress: Vec<u8> = events
            .iter()
            .filter_map(|e| match e {
                WorkerEvent::Progress(p) => Some(*p),
                _ => None,
            })
            .collect();

        assert_eq!(done, (0..7).collect::<Vec<_>>());
        assert_eq!(progress.len(), 7);
        assert!(progress.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(progress.last(), Some(&100));
    }

    #[test]
    fn test_empty_input_emits_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let out_dir = tmp.path().join("output");
        let decoder = ScriptedDecoder {
            available: false,
            ..ScriptedDecoder::new()
        };

        let worker = ConversionWorker::new(Vec::new(), Arc::new(decoder), out_dir.clone());
        let (result, events) = collect(worker);

        assert!(events.is_empty());
        assert_eq!(result.unwrap().total, 0);
        assert!(!out_dir.exists(), "空列表不应创建输出目录");
    }

    #[test]
    fn test_missing_decoder_is_fatal_before_any_item() {
        let tmp = tempfile::tempdir().unwrap();
        let inputs = touch_inputs(tmp.path(), &["a.wem"]);
        let decoder = Arc::new(ScriptedDecoder {
            available: false,
            ..ScriptedDecoder::new()
        });

        let worker = ConversionWorker::new(inputs, decoder.clone(), tmp.path().join("output"));
        let (result, events) = collect(worker);

        assert!(matches!(result, Err(ConvertError::DecoderMissing(_))));
        assert!(events.is_empty());
        assert!(decoder.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_missing_input_is_item_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let mut inputs = touch_inputs(tmp.path(), &["a.wem"]);
        inputs.insert(0, tmp.path().join("ghost.wem"));
        let decoder = Arc::new(ScriptedDecoder::new());

        let worker = ConversionWorker::new(inputs, decoder.clone(), tmp.path().join("output"));
        let (result, events) = collect(worker);

        match &events[0] {
            WorkerEvent::ItemDone {
                index: 0,
                outcome: Outcome::Failed(message),
            } => assert!(!message.is_empty()),
            other => panic!("unexpected event: {other:?}"),
        }
        // 后续文件继续处理
        assert_eq!(result.unwrap().converted, 1);
        assert_eq!(decoder.calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_decoder_io_error_is_item_failure_and_batch_continues() {
        let tmp = tempfile::tempdir().unwrap();
        let inputs = touch_inputs(tmp.path(), &["a.wem", "b.wem"]);
        let out_dir = tmp.path().join("output");
        let decoder = Arc::new(ScriptedDecoder::new().unlaunchable("a.wem"));

        let worker = ConversionWorker::new(inputs, decoder.clone(), out_dir.clone());
        let (result, events) = collect(worker);

        assert_eq!(
            events,
            vec![
                WorkerEvent::ItemDone {
                    index: 0,
                    outcome: Outcome::Failed("cannot launch decoder".to_string()),
                },
                WorkerEvent::Progress(50),
                WorkerEvent::ItemDone {
                    index: 1,
                    outcome: Outcome::Converted(out_dir.join("b.wav")),
                },
                WorkerEvent::Progress(100),
            ]
        );

        let summary = result.unwrap();
        assert_eq!((summary.converted, summary.failed), (1, 1));
        assert_eq!(decoder.calls.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_spawned_worker_delivers_events_then_disconnects() {
        let tmp = tempfile::tempdir().unwrap();
        let inputs = touch_inputs(tmp.path(), &["a.wem", "b.wem", "c.wem"]);
        let decoder = Arc::new(ScriptedDecoder::new());

        let handle = ConversionWorker::new(inputs, decoder, tmp.path().join("output"))
            .spawn()
            .unwrap();

        let events: Vec<WorkerEvent> = handle.events().iter().collect();
        assert_eq!(events.len(), 6);
        assert_eq!(events[5], WorkerEvent::Progress(100));

        let summary = handle.join().unwrap();
        assert_eq!(summary.converted, 3);
    }
}
