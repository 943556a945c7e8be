/*
 * // Copyright (c) Radzivon Bartoshyk. All rights reserved.
 * //
 * // Redistribution and use in source and binary forms, with or without modification,
 * // are permitted provided that the following conditions are met:
 * //
 * // 1.  Redistributions of source code must retain the above copyright notice, this
 * // list of conditions and the following disclaimer.
 * //
 * // 2.  Redistributions in binary form must reproduce the above copyright notice,
 * // this list of conditions and the following disclaimer in the documentation
 * // and/or other materials provided with the distribution.
 * //
 * // 3.  Neither the name of the copyright holder nor the names of its
 * // contributors may be used to endorse or promote products derived from
 * // this software without specific prior written permission.
 * //
 * // THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * // AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * // IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * // DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * // FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * // DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * // SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * // CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * // OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * // OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */

use image::{GenericImageView, ImageError, ImageReader, RgbImage};
use recblur::{recursive_blur, BlurChannels, BlurImage, BlurImageMut, ThreadingPolicy};
use std::path::{Path, PathBuf};
use std::process::exit;
use std::time::Instant;

const SIGMA: f32 = 3.0;

/// `dir/name.ext` -> `dir/name_out.jpg`
fn output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("image");
    let file_name = format!("{stem}_out.jpg");
    match input.parent() {
        Some(parent) => parent.join(file_name),
        None => PathBuf::from(file_name),
    }
}

fn main() {
    println!("Recursive IIR Gaussian Blur");
    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "recblur-app".to_string());
    let Some(in_file) = args.next() else {
        println!("usage: {program} image");
        println!("eg: {program} image.jpg");
        exit(0);
    };

    let start_time = Instant::now();
    let dyn_image = match ImageReader::open(&in_file)
        .map_err(ImageError::IoError)
        .and_then(|reader| reader.decode())
    {
        Ok(img) => img,
        Err(err) => {
            eprintln!("load: {in_file} fail: {err}");
            exit(-1);
        }
    };
    println!("load time: {} ms.", start_time.elapsed().as_millis());

    let dimensions = dyn_image.dimensions();
    let img = dyn_image.to_rgb8();
    let src = BlurImage::borrow(&img, dimensions.0, dimensions.1, BlurChannels::Channels3);
    let mut dst = BlurImageMut::alloc(dimensions.0, dimensions.1, BlurChannels::Channels3);

    let start_time = Instant::now();
    if let Err(err) = recursive_blur(&src, &mut dst, SIGMA, ThreadingPolicy::Single) {
        eprintln!("blur fail: {err}");
        exit(-1);
    }
    println!("process time: {} ms.", start_time.elapsed().as_millis());

    let out_file = output_path(Path::new(&in_file));
    let start_time = Instant::now();
    let blurred = RgbImage::from_raw(dimensions.0, dimensions.1, dst.data.borrow().to_vec())
        .expect("blurred plane has exact image size");
    if let Err(err) = blurred.save(&out_file) {
        eprintln!("save JPEG fail: {err}");
        return;
    }
    println!("save time: {} ms.", start_time.elapsed().as_millis());
}
