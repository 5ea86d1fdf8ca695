pub mod contour;
pub mod decoder;
pub mod segmenter;

// Re-exports for convenience
pub use contour::{Defect, HandGeometry, analyze_mask};
pub use decoder::decode_frame;
pub use segmenter::segment_hand;

use std::panic::{self, AssertUnwindSafe};
use std::thread;

use crossbeam_channel::{Receiver, Sender};
use image::RgbImage;

use crate::gesture;
use crate::types::{FrameError, Recognition, Tuning};

/// Classifies one encoded frame payload end to end.
///
/// Decode failures surface as errors; everything past decoding resolves to
/// a `Recognition`, with all geometric rejections folded into `NoGesture`.
pub fn classify_frame(bytes: &[u8], tuning: &Tuning) -> Result<Recognition, FrameError> {
    let frame = decoder::decode_frame(bytes, tuning)?;
    Ok(classify_decoded(&frame, tuning))
}

/// Runs the silhouette pipeline on an already decoded frame.
pub fn classify_decoded(frame: &RgbImage, tuning: &Tuning) -> Recognition {
    let mask = segmenter::segment_hand(frame, tuning);
    let Some(geometry) = contour::analyze_mask(&mask, tuning) else {
        return Recognition::NoGesture;
    };
    match gesture::classify_geometry(&geometry, tuning) {
        Some(letter) => Recognition::Letter(letter),
        None => Recognition::NoGesture,
    }
}

/// Spawns the per-frame classification worker.
///
/// One encoded payload in, one `Recognition` out. The loop drops stale
/// frames when the producer runs ahead, reports every processing failure
/// as `Fault` instead of dying, and exits once either channel disconnects.
pub fn start_classifier(
    frame_rx: Receiver<Vec<u8>>,
    result_tx: Sender<Recognition>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        log::info!("starting silhouette classifier worker");
        run_worker_loop(&Tuning::default(), frame_rx, result_tx);
    })
}

fn run_worker_loop(tuning: &Tuning, frame_rx: Receiver<Vec<u8>>, result_tx: Sender<Recognition>) {
    while let Some(payload) = recv_latest_frame(&frame_rx) {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| classify_frame(&payload, tuning)));
        let recognition = match outcome {
            Ok(Ok(recognition)) => recognition,
            Ok(Err(err)) => {
                log::warn!("frame dropped: {err}");
                Recognition::Fault
            }
            Err(_) => {
                log::error!("frame processing panicked, reporting fault");
                Recognition::Fault
            }
        };

        if result_tx.send(recognition).is_err() {
            break;
        }
    }
}

fn recv_latest_frame(frame_rx: &Receiver<Vec<u8>>) -> Option<Vec<u8>> {
    let mut payload = frame_rx.recv().ok()?;
    while let Ok(newer) = frame_rx.try_recv() {
        payload = newer;
    }
    Some(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::encode_png;
    use crate::types::Letter;
    use crossbeam_channel::unbounded;
    use image::Rgb;
    use imageproc::drawing::draw_filled_rect_mut;
    use imageproc::rect::Rect;

    #[test]
    fn blank_frame_classifies_as_no_gesture() {
        let frame = RgbImage::from_pixel(500, 500, Rgb([255; 3]));
        assert_eq!(
            classify_decoded(&frame, &Tuning::default()),
            Recognition::NoGesture
        );
    }

    #[test]
    fn fist_like_block_classifies_as_a() {
        let mut frame = RgbImage::from_pixel(500, 500, Rgb([255; 3]));
        draw_filled_rect_mut(
            &mut frame,
            Rect::at(200, 150).of_size(100, 150),
            Rgb([0, 0, 0]),
        );
        assert_eq!(
            classify_decoded(&frame, &Tuning::default()),
            Recognition::Letter(Letter::A)
        );
    }

    #[test]
    fn worker_reports_faults_and_keeps_serving() {
        let (frame_tx, frame_rx) = unbounded();
        let (result_tx, result_rx) = unbounded();
        let handle = start_classifier(frame_rx, result_tx);

        frame_tx.send(b"definitely not an image".to_vec()).unwrap();
        assert_eq!(result_rx.recv().unwrap(), Recognition::Fault);

        let blank = encode_png(&RgbImage::from_pixel(500, 500, Rgb([255; 3])));
        frame_tx.send(blank).unwrap();
        assert_eq!(result_rx.recv().unwrap(), Recognition::NoGesture);

        drop(frame_tx);
        handle.join().unwrap();
    }
}
