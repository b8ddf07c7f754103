// ============================================================
// Layer 6 — Device Selection
// ============================================================
// CUDA device 0 when the binary was built with `--features cuda` and a
// GPU is present, CPU otherwise. `force_cpu` skips the CUDA check entirely.

use anyhow::Result;
use candle::Device;

pub fn select_device(force_cpu: bool) -> Result<Device> {
    if force_cpu {
        return Ok(Device::Cpu);
    }
    Ok(Device::cuda_if_available(0)?)
}

/// Short name for logs: "cuda", "metal" or "cpu".
pub fn device_label(device: &Device) -> &'static str {
    if device.is_cuda() {
        "cuda"
    } else if device.is_metal() {
        "metal"
    } else {
        "cpu"
    }
}
