use livewire::{CostWeights, Pixel, Scissors};
use std::time::Instant;

// Concentric rings give the search real edges to follow.
fn build_image(w: u32, h: u32) -> Vec<f32> {
    let cx = w as f32 / 2.0; let cy = h as f32 / 2.0;
    let mut v = Vec::with_capacity((w*h) as usize);
    for y in 0..h { for x in 0..w {
        let r = ((x as f32 - cx).powi(2) + (y as f32 - cy).powi(2)).sqrt();
        v.push(if (r / 24.0) as u32 % 2 == 0 { 200.0 } else { 40.0 });
    } }
    v
}

fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() { return 0.0; }
    let idx = ((sorted.len() as f64 - 1.0) * p).round() as usize;
    sorted[idx.min(sorted.len()-1)]
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let mut size = 512u32;
    let mut seeds = 10usize;
    let mut queries = 10000usize;
    let mut assert_ms: Option<f64> = None;
    for a in &args[1..] {
        if let Some(val)=a.strip_prefix("--size=") { if let Ok(v)=val.parse() { size=v; } }
        else if let Some(val)=a.strip_prefix("--seeds=") { if let Ok(v)=val.parse() { seeds=v; } }
        else if let Some(val)=a.strip_prefix("--queries=") { if let Ok(v)=val.parse() { queries=v; } }
        else if let Some(val)=a.strip_prefix("--assert-ms=") { if let Ok(v)=val.parse() { assert_ms=Some(v); } }
    }

    let pixels = build_image(size, size);
    let t_build = Instant::now();
    let mut scissors = match Scissors::from_raw_pixel_data(&pixels, size, size, None, CostWeights::default()) {
        Ok(s) => s,
        Err(e) => { eprintln!("FAIL: {e}"); std::process::exit(1); }
    };
    let build_ms = t_build.elapsed().as_secs_f64() * 1000.0;

    let mut search_ms: Vec<f64> = Vec::with_capacity(seeds);
    let mut query_ms: Vec<f64> = Vec::with_capacity(queries);
    let mut total_len = 0usize;
    let s = size as i32;
    for k in 0..seeds {
        let seed = Pixel::new((k as i32 * 37) % s, (k as i32 * 53) % s);
        let t0 = Instant::now();
        if let Err(e) = scissors.start_search(seed) { eprintln!("FAIL: {e}"); std::process::exit(1); }
        search_ms.push(t0.elapsed().as_secs_f64() * 1000.0);
        for q in 0..queries / seeds.max(1) {
            let target = Pixel::new((q as i32 * 7919) % s, (q as i32 * 104729) % s);
            let t1 = Instant::now();
            total_len += scissors.find_path_to_point(target).len();
            query_ms.push(t1.elapsed().as_secs_f64() * 1000.0);
        }
    }
    search_ms.sort_by(|a,b| a.total_cmp(b));
    query_ms.sort_by(|a,b| a.total_cmp(b));
    let med = percentile(&search_ms, 0.5);
    println!("size={} build_ms={:.3} search_median_ms={:.3} search_p90_ms={:.3} query_median_ms={:.4} query_p99_ms={:.4} path_points={}",
        size, build_ms, med, percentile(&search_ms, 0.9), percentile(&query_ms, 0.5), percentile(&query_ms, 0.99), total_len);
    if let Some(th) = assert_ms { if med > th { eprintln!("FAIL: median search {:.3} ms > threshold {:.3} ms", med, th); std::process::exit(1); } }
}
